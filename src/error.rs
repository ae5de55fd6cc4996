//! Error types for nbpost
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nbpost operations
pub type NbpostResult<T> = Result<T, NbpostError>;

/// Main error type for nbpost operations
#[derive(Error, Debug)]
pub enum NbpostError {
    /// Notebook file does not exist
    #[error("notebook not found: {path}")]
    NotebookNotFound { path: PathBuf },

    /// Directory the post is written into does not exist
    #[error("post directory not found: {path}")]
    PostDirNotFound { path: PathBuf },

    /// Date does not start with YYYY-MM-DD
    #[error("incorrect date format '{date}', need YYYY-MM-DD")]
    InvalidDate { date: String },

    /// Notebook path has no grandparent to use as the site root
    #[error("cannot derive site root from notebook path {path}")]
    NoRepoRoot { path: PathBuf },

    /// Notebook JSON could not be parsed
    #[error("invalid notebook {file}: {message}")]
    InvalidNotebook { file: PathBuf, message: String },

    /// Notebook uses a format version other than 4
    #[error("unsupported nbformat {major} in {file} (only version 4 is supported)")]
    UnsupportedNbformat { file: PathBuf, major: u64 },

    /// Sidecar metadata file could not be read or parsed
    #[error("cannot load {file}: {message}")]
    MetadataLoad { file: PathBuf, message: String },

    /// Required key missing from the sidecar metadata file
    #[error("missing required key '{key}' in {file}")]
    MissingMetadataKey { key: String, file: PathBuf },

    /// Metadata value has a shape that cannot become front matter
    #[error("invalid value for '{key}' in {file}: {message}")]
    InvalidMetadataValue {
        key: String,
        file: PathBuf,
        message: String,
    },

    /// Same front-matter key supplied twice
    #[error("front-matter key '{key}' given more than once")]
    DuplicateFrontMatterKey { key: String },

    /// Embedded output could not be decoded
    #[error("cannot decode output resource '{name}': {message}")]
    ResourceDecode { name: String, message: String },

    /// Site configuration file is invalid
    #[error("invalid config {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
