//! nbpost CLI - Jupyter notebook to blog post converter
//!
//! Usage: nbpost [OPTIONS] <NAME>

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use nbpost::{convert, resolve_notebook, Config, ConvertRequest, PostMetadata};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Initialise tracing-based logging.
///
/// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
fn init_logging(verbose: u8, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Ignore error if a subscriber is already set.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let (config, warnings) =
        Config::discover(cli.config.as_deref(), &cwd).context("failed to load configuration")?;

    for w in &warnings {
        match (&w.line, &w.suggestion) {
            (Some(line), Some(suggestion)) => warn!(
                "unknown config key '{}' in {}:{} (did you mean '{}'?)",
                w.key,
                w.file.display(),
                line,
                suggestion
            ),
            (Some(line), None) => {
                warn!("unknown config key '{}' in {}:{}", w.key, w.file.display(), line)
            }
            (None, _) => warn!("unknown config key '{}' in {}", w.key, w.file.display()),
        }
    }

    let notebooks_dir = cli
        .notebooks
        .clone()
        .unwrap_or_else(|| config.notebooks_dir.clone());
    let source = resolve_notebook(&notebooks_dir, cli.notebook_name());

    let metadata = PostMetadata::load(&source.metadata)?;
    let fields = metadata.front_matter_fields(&config.front_matter)?;

    let request = ConvertRequest::new(source.notebook, metadata.date, metadata.slug)
        .with_fields(fields)
        .with_mathjax(config.front_matter.mathjax)
        .with_dry_run(cli.dry_run);

    let summary = convert(&request)
        .with_context(|| format!("failed to convert notebook '{}'", cli.notebook_name()))?;

    if summary.dry_run {
        println!(
            "Dry run: would write {} ({} images)",
            summary.post_file.display(),
            summary.resources
        );
    } else {
        println!(
            "Wrote {} ({} images)",
            summary.post_file.display(),
            summary.resources
        );
    }

    Ok(())
}
