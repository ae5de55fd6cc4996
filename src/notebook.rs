//! Notebook document model
//!
//! A serde model of the nbformat v4 JSON layout. Only the fields the
//! exporter reads are typed; everything else is kept as raw JSON metadata.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{NbpostError, NbpostResult};

/// The only nbformat major version understood by the exporter
pub const SUPPORTED_NBFORMAT: u64 = 4;

/// A parsed notebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: NotebookMetadata,
    pub nbformat: u64,
    #[serde(default)]
    pub nbformat_minor: u64,
}

/// Notebook-level metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_info: Option<LanguageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernelspec: Option<KernelSpec>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageInfo {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KernelSpec {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Kind of notebook cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Code,
    Markdown,
    Raw,
}

/// A notebook cell, tagged by `cell_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    Code(CodeCell),
    Markdown(TextCell),
    Raw(TextCell),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeCell {
    #[serde(default, deserialize_with = "multiline")]
    pub source: String,
    #[serde(default)]
    pub outputs: Vec<Output>,
    #[serde(default)]
    pub execution_count: Option<i64>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Markdown and raw cells share a layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextCell {
    #[serde(default, deserialize_with = "multiline")]
    pub source: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Value>,
}

impl TextCell {
    /// Target format of a raw cell (`raw_mimetype`, or the older `format`)
    pub fn raw_mimetype(&self) -> Option<&str> {
        self.metadata
            .get("raw_mimetype")
            .or_else(|| self.metadata.get("format"))
            .and_then(Value::as_str)
    }
}

impl Cell {
    /// Create a code cell with no outputs
    pub fn code(source: impl Into<String>) -> Self {
        Cell::Code(CodeCell {
            source: source.into(),
            ..CodeCell::default()
        })
    }

    /// Create a markdown cell
    pub fn markdown(source: impl Into<String>) -> Self {
        Cell::Markdown(TextCell {
            source: source.into(),
            ..TextCell::default()
        })
    }

    /// Create a raw cell
    pub fn raw(source: impl Into<String>) -> Self {
        Cell::Raw(TextCell {
            source: source.into(),
            ..TextCell::default()
        })
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Code(_) => CellKind::Code,
            Cell::Markdown(_) => CellKind::Markdown,
            Cell::Raw(_) => CellKind::Raw,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Cell::Code(c) => &c.source,
            Cell::Markdown(c) | Cell::Raw(c) => &c.source,
        }
    }
}

/// A code cell output, tagged by `output_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum Output {
    Stream {
        #[serde(default)]
        name: String,
        #[serde(default, deserialize_with = "multiline")]
        text: String,
    },
    DisplayData {
        #[serde(default)]
        data: MimeBundle,
        #[serde(default)]
        metadata: Map<String, Value>,
    },
    ExecuteResult {
        #[serde(default)]
        data: MimeBundle,
        #[serde(default)]
        metadata: Map<String, Value>,
        #[serde(default)]
        execution_count: Option<i64>,
    },
    Error {
        #[serde(default)]
        ename: String,
        #[serde(default)]
        evalue: String,
        #[serde(default)]
        traceback: Vec<String>,
    },
}

/// Mime type to payload mapping of a rich output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MimeBundle(pub BTreeMap<String, Value>);

impl MimeBundle {
    pub fn contains(&self, mime: &str) -> bool {
        self.0.contains_key(mime)
    }

    /// Textual payload for `mime`, joining list-of-lines payloads
    pub fn text(&self, mime: &str) -> Option<String> {
        match self.0.get(mime)? {
            Value::String(s) => Some(s.clone()),
            Value::Array(lines) => Some(
                lines
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .concat(),
            ),
            _ => None,
        }
    }
}

impl Notebook {
    /// Read and parse a notebook file
    pub fn read(path: &Path) -> NbpostResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content, path)
    }

    /// Parse notebook JSON; `file` is only used for error reporting
    pub fn from_json(content: &str, file: &Path) -> NbpostResult<Self> {
        let invalid = |message: String| NbpostError::InvalidNotebook {
            file: file.to_path_buf(),
            message,
        };

        let value: Value = serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let major = value
            .get("nbformat")
            .and_then(Value::as_u64)
            .ok_or_else(|| invalid("missing 'nbformat' version".to_string()))?;

        if major != SUPPORTED_NBFORMAT {
            return Err(NbpostError::UnsupportedNbformat {
                file: file.to_path_buf(),
                major,
            });
        }

        serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
    }

    /// Language used to tag code fences
    pub fn language(&self) -> &str {
        self.metadata
            .language_info
            .as_ref()
            .map(|info| info.name.as_str())
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.metadata
                    .kernelspec
                    .as_ref()
                    .and_then(|spec| spec.language.as_deref())
            })
            .unwrap_or("")
    }
}

/// nbformat stores text either as one string or as a list of lines
fn multiline<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Multiline {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Multiline::deserialize(deserializer)? {
        Multiline::One(s) => s,
        Multiline::Many(lines) => lines.concat(),
    })
}
