//! nbpost - Jupyter notebook to blog post converter
//!
//! Converts a notebook plus a small YAML sidecar into a Markdown post with
//! front matter, extracting image outputs into the site's static directory.

pub mod config;
pub mod convert;
pub mod doctor;
pub mod error;
pub mod filter;
pub mod frontmatter;
pub mod metadata;
pub mod notebook;
pub mod paths;
pub mod render;

// Re-exports for convenience
pub use config::{Config, FrontMatterDefaults};
pub use convert::{convert, render_post, ConversionSummary, ConvertRequest, RenderedPost};
pub use doctor::doctor;
pub use error::{NbpostError, NbpostResult};
pub use filter::{filter_cells, Preprocessor, StripBlankCodeCells};
pub use frontmatter::{FrontMatter, FrontMatterValue};
pub use metadata::PostMetadata;
pub use notebook::{Cell, CellKind, Notebook, Output};
pub use paths::{is_valid_date, resolve_notebook, NotebookSource, PostPaths};
pub use render::{ExportConfig, MarkdownExporter, Rendered, Resources};
