//! Output path derivation
//!
//! A post lives at `content/post/<date>-<slug>.md` and its images under
//! `static/<year>/<month>/<slug>/`, both relative to the site root, which is
//! the notebook's grandparent directory.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{NbpostError, NbpostResult};

const NOTEBOOK_EXTENSION: &str = "ipynb";
const METADATA_EXTENSION: &str = "yml";

fn date_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("date pattern is valid"))
}

/// Check that `date` starts with `YYYY-MM-DD`.
///
/// Only the start is anchored: `2020-01-01-draft` passes, as does an
/// impossible `2020-13-40`.
pub fn is_valid_date(date: &str) -> bool {
    date_prefix().is_match(date)
}

/// Notebook and sidecar metadata paths for a notebook name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookSource {
    pub notebook: PathBuf,
    pub metadata: PathBuf,
}

/// Resolve `<dir>/<name>.ipynb` and `<dir>/<name>.yml`
pub fn resolve_notebook(notebooks_dir: &Path, name: &str) -> NotebookSource {
    NotebookSource {
        notebook: notebooks_dir.join(format!("{}.{}", name, NOTEBOOK_EXTENSION)),
        metadata: notebooks_dir.join(format!("{}.{}", name, METADATA_EXTENSION)),
    }
}

/// Paths touched by one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPaths {
    pub notebook: PathBuf,
    pub image_dir: PathBuf,
    pub post_file: PathBuf,
    date: String,
}

impl PostPaths {
    /// Derive output locations from the notebook path, date and slug.
    ///
    /// Nothing is checked on disk here; see [`PostPaths::validate`].
    pub fn derive(notebook: &Path, date: &str, slug: &str) -> NbpostResult<Self> {
        let root = notebook
            .parent()
            .and_then(Path::parent)
            .ok_or_else(|| NbpostError::NoRepoRoot {
                path: notebook.to_path_buf(),
            })?;

        let mut parts = date.split('-');
        let year = parts.next().unwrap_or_default();
        let month = parts.next().unwrap_or_default();

        Ok(Self {
            notebook: notebook.to_path_buf(),
            image_dir: root.join("static").join(year).join(month).join(slug),
            post_file: root
                .join("content")
                .join("post")
                .join(format!("{}-{}.md", date, slug)),
            date: date.to_string(),
        })
    }

    /// Fail fast before anything is written: the notebook must exist, the
    /// post directory must exist and the date must look like `YYYY-MM-DD`.
    pub fn validate(&self) -> NbpostResult<()> {
        if !self.notebook.exists() {
            return Err(NbpostError::NotebookNotFound {
                path: self.notebook.clone(),
            });
        }

        let post_dir = self.post_file.parent().unwrap_or_else(|| Path::new(""));
        if !post_dir.is_dir() {
            return Err(NbpostError::PostDirNotFound {
                path: post_dir.to_path_buf(),
            });
        }

        if !is_valid_date(&self.date) {
            return Err(NbpostError::InvalidDate {
                date: self.date.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_date_validation() {
        assert!(is_valid_date("2020-01-01"));
        assert!(is_valid_date("2020-13-40-extra"));
        assert!(is_valid_date("2020-99-99"));
        assert!(!is_valid_date("20-1-1"));
        assert!(!is_valid_date("2020-1-01"));
        assert!(!is_valid_date("x2020-01-01"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn test_resolve_notebook() {
        let source = resolve_notebook(Path::new("notebooks"), "my-post");
        assert_eq!(source.notebook, PathBuf::from("notebooks/my-post.ipynb"));
        assert_eq!(source.metadata, PathBuf::from("notebooks/my-post.yml"));
    }

    #[test]
    fn test_derive_paths() {
        let paths =
            PostPaths::derive(Path::new("site/notebooks/nb.ipynb"), "2020-03-15", "hello").unwrap();

        assert_eq!(paths.image_dir, PathBuf::from("site/static/2020/03/hello"));
        assert_eq!(
            paths.post_file,
            PathBuf::from("site/content/post/2020-03-15-hello.md")
        );
    }

    #[test]
    fn test_derive_relative_to_current_dir() {
        let paths = PostPaths::derive(Path::new("notebooks/nb.ipynb"), "2021-11-02", "s").unwrap();

        assert_eq!(paths.image_dir, PathBuf::from("static/2021/11/s"));
        assert_eq!(paths.post_file, PathBuf::from("content/post/2021-11-02-s.md"));
    }

    #[test]
    fn test_derive_without_grandparent_fails() {
        let result = PostPaths::derive(Path::new("nb.ipynb"), "2020-01-01", "s");
        assert!(matches!(result, Err(NbpostError::NoRepoRoot { .. })));
    }

    #[test]
    fn test_validate_order() {
        let dir = tempdir().unwrap();
        let notebook = dir.path().join("notebooks/nb.ipynb");
        let paths = PostPaths::derive(&notebook, "bad", "s").unwrap();

        assert!(matches!(
            paths.validate(),
            Err(NbpostError::NotebookNotFound { .. })
        ));

        fs::create_dir_all(notebook.parent().unwrap()).unwrap();
        fs::write(&notebook, "{}").unwrap();
        assert!(matches!(
            paths.validate(),
            Err(NbpostError::PostDirNotFound { .. })
        ));

        fs::create_dir_all(dir.path().join("content/post")).unwrap();
        assert!(matches!(
            paths.validate(),
            Err(NbpostError::InvalidDate { .. })
        ));

        let good = PostPaths::derive(&notebook, "2020-01-01", "s").unwrap();
        assert!(good.validate().is_ok());
    }
}
