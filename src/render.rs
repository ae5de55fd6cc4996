//! Notebook to Markdown export
//!
//! Renders a [`Notebook`] into Markdown text plus a map of extracted binary
//! outputs. Preprocessors are supplied per export through [`ExportConfig`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD, Engine};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{NbpostError, NbpostResult};
use crate::filter::{Preprocessor, StripBlankCodeCells};
use crate::notebook::{Cell, CodeCell, MimeBundle, Notebook, Output, TextCell};

/// Extracted outputs, keyed by generated file name
pub type Resources = BTreeMap<String, Vec<u8>>;

/// Mime types in the order they are preferred for rich outputs
pub const DISPLAY_PRIORITY: &[&str] = &[
    "text/html",
    "text/markdown",
    "image/svg+xml",
    "text/latex",
    "image/png",
    "image/jpeg",
    "text/plain",
];

const OUTPUT_INDENT: &str = "    ";

/// Output metadata key holding extracted file names, keyed by mime type
const FILENAMES_KEY: &str = "filenames";

fn ansi_escape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("ansi pattern is valid"))
}

/// Exporter configuration
#[derive(Default)]
pub struct ExportConfig {
    pub preprocessors: Vec<Box<dyn Preprocessor>>,
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration used for blog posts: blank code cells are stripped
    pub fn blog() -> Self {
        Self::new().with_preprocessor(StripBlankCodeCells)
    }

    pub fn with_preprocessor(mut self, preprocessor: impl Preprocessor + 'static) -> Self {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }
}

impl fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field(
                "preprocessors",
                &self.preprocessors.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Exporter output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub markdown: String,
    pub resources: Resources,
    /// Cells left after preprocessing
    pub cell_count: usize,
}

/// Renders notebooks to Markdown
#[derive(Debug, Default)]
pub struct MarkdownExporter {
    config: ExportConfig,
}

impl MarkdownExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Extract image outputs, run the preprocessors, then render.
    ///
    /// Extracted outputs are named `<unique_key>_<cell>_<output>.<ext>`.
    pub fn export(&self, notebook: &Notebook, unique_key: &str) -> NbpostResult<Rendered> {
        let mut notebook = notebook.clone();
        let mut resources = Resources::new();
        extract_outputs(&mut notebook, unique_key, &mut resources)?;

        for preprocessor in &self.config.preprocessors {
            trace!(preprocessor = preprocessor.name(), "running preprocessor");
            notebook = preprocessor.preprocess(notebook)?;
        }

        let language = notebook.language();
        let mut blocks = Vec::with_capacity(notebook.cells.len());

        for cell in &notebook.cells {
            let block = match cell {
                Cell::Markdown(md) => Some(md.source.clone()),
                Cell::Raw(raw) => render_raw(raw),
                Cell::Code(code) => Some(render_code(code, language)),
            };
            if let Some(block) = block {
                blocks.push(block);
            }
        }

        let mut markdown = blocks.join("\n\n");
        markdown.push('\n');

        Ok(Rendered {
            markdown,
            resources,
            cell_count: notebook.cells.len(),
        })
    }
}

fn render_raw(raw: &TextCell) -> Option<String> {
    match raw.raw_mimetype() {
        None | Some("") | Some("text/markdown") | Some("text/x-markdown") => {
            Some(raw.source.clone())
        }
        Some(other) => {
            debug!(mimetype = other, "skipping raw cell for another format");
            None
        }
    }
}

/// Move image payloads into `resources` and record each file name under
/// the output's `filenames` metadata.
///
/// Runs before any preprocessor, so names carry the cell's position in the
/// notebook as read.
fn extract_outputs(
    notebook: &mut Notebook,
    unique_key: &str,
    resources: &mut Resources,
) -> NbpostResult<()> {
    for (cell_index, cell) in notebook.cells.iter_mut().enumerate() {
        let Cell::Code(code) = cell else {
            continue;
        };
        for (output_index, output) in code.outputs.iter_mut().enumerate() {
            let (data, metadata) = match output {
                Output::DisplayData { data, metadata }
                | Output::ExecuteResult { data, metadata, .. } => (data, metadata),
                _ => continue,
            };
            let Some(mime) = preferred_mime(data) else {
                continue;
            };
            let Some(extension) = image_extension(mime) else {
                continue;
            };

            let file = format!("{}_{}_{}.{}", unique_key, cell_index, output_index, extension);
            let text = data.text(mime).unwrap_or_default();
            let bytes = if mime == "image/svg+xml" {
                text.into_bytes()
            } else {
                decode_base64(&text, &file)?
            };
            insert_resource(resources, file.clone(), bytes);

            let mut filenames = Map::new();
            filenames.insert(mime.to_string(), Value::String(file));
            metadata.insert(FILENAMES_KEY.to_string(), Value::Object(filenames));
        }
    }

    Ok(())
}

fn preferred_mime(data: &MimeBundle) -> Option<&'static str> {
    DISPLAY_PRIORITY.iter().copied().find(|m| data.contains(m))
}

fn image_extension(mime: &str) -> Option<&'static str> {
    match mime {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

fn render_code(code: &CodeCell, language: &str) -> String {
    let mut block = format!("```{}\n{}\n```\n", language, code.source);

    for output in &code.outputs {
        let rendered = match output {
            Output::Stream { text, .. } => Some(indent(text.trim_end_matches('\n'))),
            Output::Error { traceback, .. } => {
                let joined = traceback.join("\n");
                Some(indent(&ansi_escape().replace_all(&joined, "")))
            }
            Output::DisplayData { data, metadata }
            | Output::ExecuteResult { data, metadata, .. } => render_data(data, metadata),
        };

        if let Some(rendered) = rendered {
            block.push('\n');
            block.push_str(&rendered);
            block.push('\n');
        }
    }

    block
}

fn render_data(data: &MimeBundle, metadata: &Map<String, Value>) -> Option<String> {
    let mime = preferred_mime(data)?;

    if let Some(kind) = image_extension(mime) {
        let file = metadata
            .get(FILENAMES_KEY)
            .and_then(|names| names.get(mime))
            .and_then(Value::as_str)?;
        let label = if kind == "jpg" { "jpeg" } else { kind };
        return Some(format!("![{}]({})", label, file));
    }

    let text = data.text(mime).unwrap_or_default();
    let rendered = match mime {
        "text/plain" => indent(text.trim_end_matches('\n')),
        _ => text.trim_end_matches('\n').to_string(),
    };
    Some(rendered)
}

fn insert_resource(resources: &mut Resources, file: String, bytes: Vec<u8>) {
    debug!(resource = %file, bytes = bytes.len(), "extracted output");
    resources.insert(file, bytes);
}

fn decode_base64(payload: &str, name: &str) -> NbpostResult<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| NbpostError::ResourceDecode {
            name: name.to_string(),
            message: e.to_string(),
        })
}

/// Prefix every non-empty line with four spaces
fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", OUTPUT_INDENT, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
