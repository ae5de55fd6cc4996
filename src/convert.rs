//! Notebook to blog post conversion
//!
//! Ties the pieces together: derive and check paths, export the notebook
//! with blank code cells stripped, clean the Markdown, prepend the front
//! matter and write the post and its images.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::doctor::doctor;
use crate::error::NbpostResult;
use crate::frontmatter::FrontMatter;
use crate::notebook::Notebook;
use crate::paths::PostPaths;
use crate::render::{ExportConfig, MarkdownExporter, Resources};

/// Prefix of extracted image names; each post has its own image directory
const OUTPUT_KEY: &str = "output";

/// One conversion request
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    pub notebook: PathBuf,
    pub date: String,
    pub slug: String,
    pub mathjax: bool,
    /// Fields written after `date`, `slug` and `mathjax`
    pub fields: FrontMatter,
    /// Run everything but skip the writes
    pub dry_run: bool,
}

impl ConvertRequest {
    pub fn new(notebook: impl Into<PathBuf>, date: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            notebook: notebook.into(),
            date: date.into(),
            slug: slug.into(),
            mathjax: true,
            fields: FrontMatter::new(),
            dry_run: false,
        }
    }

    pub fn with_fields(mut self, fields: FrontMatter) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_mathjax(mut self, mathjax: bool) -> Self {
        self.mathjax = mathjax;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// A rendered post, not yet written
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPost {
    /// Front matter followed by the cleaned Markdown body
    pub text: String,
    pub resources: Resources,
    pub cells_removed: usize,
}

/// What a conversion wrote (or would have written, on a dry run)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub post_file: PathBuf,
    pub image_dir: PathBuf,
    pub resources: usize,
    pub cells_removed: usize,
    pub dry_run: bool,
}

/// Render a parsed notebook into post text and extracted images
pub fn render_post(
    notebook: &Notebook,
    unique_key: &str,
    request: &ConvertRequest,
) -> NbpostResult<RenderedPost> {
    let exporter = MarkdownExporter::new(ExportConfig::blog());
    let rendered = exporter.export(notebook, unique_key)?;
    let body = doctor(&rendered.markdown);

    let mut front_matter = FrontMatter::new();
    front_matter.insert("date", request.date.as_str())?;
    front_matter.insert("slug", request.slug.as_str())?;
    front_matter.insert("mathjax", request.mathjax)?;
    front_matter.extend(request.fields.clone())?;

    Ok(RenderedPost {
        text: front_matter.render() + &body,
        resources: rendered.resources,
        cells_removed: notebook.cells.len() - rendered.cell_count,
    })
}

/// Convert a notebook into a post plus an image directory.
///
/// Preconditions are checked before anything is read or written. A failure
/// part way through leaves whatever was already written in place.
pub fn convert(request: &ConvertRequest) -> NbpostResult<ConversionSummary> {
    let paths = PostPaths::derive(&request.notebook, &request.date, &request.slug)?;
    paths.validate()?;
    debug!(
        notebook = %paths.notebook.display(),
        post = %paths.post_file.display(),
        images = %paths.image_dir.display(),
        "derived paths"
    );

    let notebook = Notebook::read(&paths.notebook)?;
    let post = render_post(&notebook, OUTPUT_KEY, request)?;
    if post.cells_removed > 0 {
        info!(count = post.cells_removed, "removed blank code cells");
    }

    if request.dry_run {
        info!(path = %paths.post_file.display(), bytes = post.text.len(), "dry run: skipping post write");
    } else {
        fs::write(&paths.post_file, &post.text)?;
        info!(path = %paths.post_file.display(), "wrote post");
    }

    write_resources(&paths.image_dir, &post.resources, request.dry_run)?;

    Ok(ConversionSummary {
        post_file: paths.post_file,
        image_dir: paths.image_dir,
        resources: post.resources.len(),
        cells_removed: post.cells_removed,
        dry_run: request.dry_run,
    })
}

/// Write each resource into `dir`, creating it when there is anything to write
fn write_resources(dir: &Path, resources: &Resources, dry_run: bool) -> NbpostResult<()> {
    if resources.is_empty() {
        return Ok(());
    }

    if dry_run {
        for name in resources.keys() {
            info!(path = %dir.join(name).display(), "dry run: skipping image write");
        }
        return Ok(());
    }

    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    for (name, bytes) in resources {
        let path = dir.join(name);
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote image");
    }
    info!(count = resources.len(), dir = %dir.display(), "wrote images");

    Ok(())
}
