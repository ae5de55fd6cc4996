//! Tests for the config module

use super::loader::{load_with_warnings, with_env_overrides};
use super::types::*;
use super::DEFAULT_CONFIG_FILE;
use crate::error::NbpostError;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.notebooks_dir, PathBuf::from("notebooks"));
    assert_eq!(config.front_matter.author, "Adel");
    assert_eq!(config.front_matter.categories, vec!["Python", "blogging"]);
    assert_eq!(config.front_matter.thumbnail_image_position, "left");
    assert_eq!(
        config.front_matter.thumbnail_image,
        "./static/img/avatar-icon.png"
    );
    assert!(config.front_matter.mathjax);
}

#[test]
fn test_config_parse_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(
        &path,
        r#"
notebooks_dir = "nb"

[front_matter]
author = "Grace"
categories = ["Rust"]
"#,
    )
    .unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();
    assert!(warnings.is_empty());

    assert_eq!(config.notebooks_dir, PathBuf::from("nb"));
    assert_eq!(config.front_matter.author, "Grace");
    assert_eq!(config.front_matter.categories, vec!["Rust"]);
    // Unset keys keep their defaults
    assert_eq!(config.front_matter.thumbnail_image_position, "left");
}

#[test]
fn test_config_unknown_keys_warn() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, "[front_matter]\nauther = \"Typo\"\n").unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.front_matter.author, "Adel");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "auther");
    assert_eq!(warnings[0].line, Some(2));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("author"));
}

#[test]
fn test_config_invalid_toml_is_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, "notebooks_dir = [").unwrap();

    let result = load_with_warnings(&path);
    assert!(matches!(result, Err(NbpostError::InvalidConfig { .. })));
}

#[test]
fn test_discover_without_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let (config, warnings) = Config::discover(None, dir.path()).unwrap();

    assert_eq!(config.front_matter, FrontMatterDefaults::default());
    assert!(warnings.is_empty());
}

#[test]
fn test_discover_explicit_missing_file_is_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.toml");

    let result = Config::discover(Some(&missing), dir.path());
    assert!(matches!(result, Err(NbpostError::Io(_))));
}

#[test]
fn test_env_overrides() {
    let config = with_env_overrides(Config::default(), |key| match key {
        "NBPOST_AUTHOR" => Some("Ada".to_string()),
        "NBPOST_NOTEBOOKS_DIR" => Some("drafts".to_string()),
        _ => None,
    });

    assert_eq!(config.front_matter.author, "Ada");
    assert_eq!(config.notebooks_dir, PathBuf::from("drafts"));
}

#[test]
fn test_empty_env_override_is_ignored() {
    let config = with_env_overrides(Config::default(), |_| Some(String::new()));
    assert_eq!(config, Config::default());
}
