//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::NbpostResult;

use super::loader::{self, ConfigWarning};

/// Front-matter values that are the same for every post on the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatterDefaults {
    pub author: String,
    pub categories: Vec<String>,
    pub thumbnail_image_position: String,
    pub thumbnail_image: String,
    pub mathjax: bool,
}

impl Default for FrontMatterDefaults {
    fn default() -> Self {
        Self {
            author: "Adel".to_string(),
            categories: vec!["Python".to_string(), "blogging".to_string()],
            thumbnail_image_position: "left".to_string(),
            thumbnail_image: "./static/img/avatar-icon.png".to_string(),
            mathjax: true,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `<name>.ipynb` and `<name>.yml`
    #[serde(default = "default_notebooks_dir")]
    pub notebooks_dir: PathBuf,

    #[serde(default)]
    pub front_matter: FrontMatterDefaults,
}

fn default_notebooks_dir() -> PathBuf {
    PathBuf::from("notebooks")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notebooks_dir: default_notebooks_dir(),
            front_matter: FrontMatterDefaults::default(),
        }
    }
}

impl Config {
    /// Load `explicit` if given, else `nbpost.toml` under `dir` if present,
    /// else defaults. Environment overrides are applied last.
    pub fn discover(
        explicit: Option<&Path>,
        dir: &Path,
    ) -> NbpostResult<(Self, Vec<ConfigWarning>)> {
        loader::discover(explicit, dir)
    }
}
