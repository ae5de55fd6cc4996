//! Sidecar metadata file
//!
//! Each notebook `<name>.ipynb` has a `<name>.yml` next to it carrying the
//! post's date, slug, title, tags and summary. Any other top-level keys are
//! carried into the front matter after the standard fields.

use std::fs;
use std::path::Path;

use serde_yaml_ng::{Mapping, Value};

use crate::config::FrontMatterDefaults;
use crate::error::{NbpostError, NbpostResult};
use crate::frontmatter::{FrontMatter, FrontMatterValue};

/// Keys every metadata file must define
pub const REQUIRED_KEYS: &[&str] = &["date", "slug", "title", "tags", "summary"];

/// Site-wide fields a metadata file may override for one post
const OVERRIDABLE_KEYS: &[&str] = &[
    "author",
    "categories",
    "thumbnailImagePosition",
    "thumbnailImage",
];

/// Parsed `<name>.yml`
#[derive(Debug, Clone, PartialEq)]
pub struct PostMetadata {
    pub date: String,
    pub slug: String,
    pub title: String,
    pub tags: Vec<String>,
    pub summary: String,
    /// Remaining keys, in file order
    pub extra: FrontMatter,
}

impl PostMetadata {
    /// Read and parse a metadata file
    pub fn load(path: &Path) -> NbpostResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| NbpostError::MetadataLoad {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content, path)
    }

    /// Parse metadata YAML; `file` is only used for error reporting
    pub fn from_yaml(content: &str, file: &Path) -> NbpostResult<Self> {
        let load_error = |message: String| NbpostError::MetadataLoad {
            file: file.to_path_buf(),
            message,
        };

        let value: Value = serde_yaml_ng::from_str(content).map_err(|e| load_error(e.to_string()))?;
        let Value::Mapping(mapping) = value else {
            return Err(load_error("expected a YAML mapping at the top level".to_string()));
        };

        let date = required_scalar(&mapping, "date", file)?;
        let slug = required_scalar(&mapping, "slug", file)?;
        let title = required_scalar(&mapping, "title", file)?;
        let tags = string_list(required(&mapping, "tags", file)?)
            .ok_or_else(|| invalid("tags", file, "expected a list of scalars"))?;
        let summary = required_scalar(&mapping, "summary", file)?;
        let extra = extra_fields(&mapping, file)?;

        Ok(Self {
            date,
            slug,
            title,
            tags,
            summary,
            extra,
        })
    }

    /// Front-matter fields that follow `date`, `slug` and `mathjax`.
    ///
    /// Order: title, author, categories, tags, summary,
    /// thumbnailImagePosition, thumbnailImage, then the extra keys. Extra
    /// keys naming one of the site-wide fields replace its default.
    pub fn front_matter_fields(&self, defaults: &FrontMatterDefaults) -> NbpostResult<FrontMatter> {
        let site_value = |key: &str, default: FrontMatterValue| -> FrontMatterValue {
            self.extra.get(key).cloned().unwrap_or(default)
        };

        let mut fields = FrontMatter::new();
        fields.insert("title", self.title.as_str())?;
        fields.insert("author", site_value("author", defaults.author.clone().into()))?;
        fields.insert(
            "categories",
            site_value("categories", defaults.categories.clone().into()),
        )?;
        fields.insert("tags", self.tags.clone())?;
        fields.insert("summary", self.summary.as_str())?;
        fields.insert(
            "thumbnailImagePosition",
            site_value(
                "thumbnailImagePosition",
                defaults.thumbnail_image_position.clone().into(),
            ),
        )?;
        fields.insert(
            "thumbnailImage",
            site_value("thumbnailImage", defaults.thumbnail_image.clone().into()),
        )?;

        for key in self.extra.keys() {
            if OVERRIDABLE_KEYS.contains(&key) {
                continue;
            }
            if let Some(value) = self.extra.get(key) {
                fields.insert(key, value.clone())?;
            }
        }

        Ok(fields)
    }
}

fn required<'a>(mapping: &'a Mapping, key: &str, file: &Path) -> NbpostResult<&'a Value> {
    mapping
        .get(key)
        .ok_or_else(|| NbpostError::MissingMetadataKey {
            key: key.to_string(),
            file: file.to_path_buf(),
        })
}

fn required_scalar(mapping: &Mapping, key: &str, file: &Path) -> NbpostResult<String> {
    let value = required(mapping, key, file)?;
    scalar_string(value).ok_or_else(|| invalid(key, file, "expected a scalar value"))
}

fn invalid(key: &str, file: &Path, message: &str) -> NbpostError {
    NbpostError::InvalidMetadataValue {
        key: key.to_string(),
        file: file.to_path_buf(),
        message: message.to_string(),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        _ => None,
    }
}

/// A sequence of scalars, or one scalar treated as a single-item list
fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Sequence(items) => items.iter().map(scalar_string).collect(),
        other => scalar_string(other).map(|s| vec![s]),
    }
}

fn front_matter_value(value: &Value) -> Option<FrontMatterValue> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(FrontMatterValue::Int)
            .or_else(|| n.as_f64().map(FrontMatterValue::Float)),
        Value::Sequence(_) => string_list(value).map(FrontMatterValue::List),
        Value::Tagged(tagged) => front_matter_value(&tagged.value),
        other => scalar_string(other).map(FrontMatterValue::Str),
    }
}

fn extra_fields(mapping: &Mapping, file: &Path) -> NbpostResult<FrontMatter> {
    let mut extra = FrontMatter::new();

    for (key, value) in mapping {
        let key = scalar_string(key)
            .ok_or_else(|| invalid("<key>", file, "metadata keys must be scalars"))?;
        if REQUIRED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let value = front_matter_value(value)
            .ok_or_else(|| invalid(&key, file, "expected a scalar or a list of scalars"))?;
        extra.insert(key, value)?;
    }

    Ok(extra)
}
