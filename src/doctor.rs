//! Markdown cleanup after export
//!
//! The exporter leaves runs of blank lines after code fences and between
//! the lines of indented output blocks. `doctor` collapses both.

use std::sync::OnceLock;

use regex::Regex;

const FENCE: &str = "```";

fn post_fence_newlines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```\n+").expect("post-fence pattern is valid"))
}

fn output_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {4}\S").expect("output line pattern is valid"))
}

/// Clean exported Markdown.
///
/// 1. Any run of newlines right after a fence marker becomes exactly two.
/// 2. Outside fenced blocks, blank lines between two lines indented by
///    exactly four spaces are removed, so the output reads as one block.
///
/// `doctor(&doctor(s)) == doctor(s)` for every input.
pub fn doctor(markdown: &str) -> String {
    let fenced = post_fence_newlines().replace_all(markdown, "```\n\n");
    join_output_blocks(&fenced)
}

fn is_output_line(line: &str) -> bool {
    output_line().is_match(line)
}

fn join_output_blocks(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut in_fence = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.is_empty() && !in_fence {
            let mut end = i;
            while end < lines.len() && lines[end].is_empty() {
                end += 1;
            }

            // A fence-terminated line keeps its gap; pass 1 owns that spacing.
            let joinable = match (kept.last(), lines.get(end)) {
                (Some(prev), Some(next)) => {
                    is_output_line(prev) && !prev.ends_with(FENCE) && is_output_line(next)
                }
                _ => false,
            };
            if !joinable {
                kept.extend_from_slice(&lines[i..end]);
            }
            i = end;
            continue;
        }

        if line.trim_start().starts_with(FENCE) {
            in_fence = !in_fence;
        }
        kept.push(line);
        i += 1;
    }

    kept.join("\n")
}
