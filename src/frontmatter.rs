//! YAML front-matter generation
//!
//! Builds the `---` delimited header that static site generators read.
//! Values are written as-is; no YAML escaping is applied.

use std::fmt;

use crate::error::{NbpostError, NbpostResult};

/// Delimiter for frontmatter sections
pub const FRONTMATTER_DELIMITER: &str = "---";

/// A front-matter value: a scalar or a list of strings
#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatterValue {
    Str(String),
    Int(i64),
    Float(f64),
    List(Vec<String>),
}

impl fmt::Display for FrontMatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontMatterValue::Str(s) => f.write_str(s),
            FrontMatterValue::Int(i) => write!(f, "{}", i),
            FrontMatterValue::Float(x) => f.write_str(&float_repr(*x)),
            FrontMatterValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Shortest round-trip form of `x`, in positional notation for decimal
/// exponents from -4 to 15 and as `1.5e+20` / `1e-07` outside that range.
/// Whole values keep their `.0`.
fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", x);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let positional = x.to_string();
        if positional.contains('.') {
            positional
        } else {
            format!("{}.0", positional)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

impl From<&str> for FrontMatterValue {
    fn from(value: &str) -> Self {
        FrontMatterValue::Str(value.to_string())
    }
}

impl From<String> for FrontMatterValue {
    fn from(value: String) -> Self {
        FrontMatterValue::Str(value)
    }
}

impl From<i64> for FrontMatterValue {
    fn from(value: i64) -> Self {
        FrontMatterValue::Int(value)
    }
}

impl From<f64> for FrontMatterValue {
    fn from(value: f64) -> Self {
        FrontMatterValue::Float(value)
    }
}

impl From<bool> for FrontMatterValue {
    fn from(value: bool) -> Self {
        FrontMatterValue::Str(value.to_string())
    }
}

impl From<Vec<String>> for FrontMatterValue {
    fn from(value: Vec<String>) -> Self {
        FrontMatterValue::List(value)
    }
}

impl From<Vec<&str>> for FrontMatterValue {
    fn from(value: Vec<&str>) -> Self {
        FrontMatterValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Insertion-ordered front-matter fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: Vec<(String, FrontMatterValue)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; a key may only be given once
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FrontMatterValue>,
    ) -> NbpostResult<()> {
        let key = key.into();
        if self.contains(&key) {
            return Err(NbpostError::DuplicateFrontMatterKey { key });
        }
        self.fields.push((key, value.into()));
        Ok(())
    }

    /// Append every field of `other`, in order
    pub fn extend(&mut self, other: FrontMatter) -> NbpostResult<()> {
        for (key, value) in other.fields {
            self.insert(key, value)?;
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render the header block, including both delimiter lines.
    ///
    /// # Example
    /// ```text
    /// ---
    /// date : 2020-01-01
    /// tags:
    ///   - a
    /// ---
    /// ```
    pub fn render(&self) -> String {
        let mut header = format!("{}\n", FRONTMATTER_DELIMITER);

        for (key, value) in &self.fields {
            match value {
                FrontMatterValue::List(items) => {
                    header.push_str(&format!("{}: \n", key));
                    for item in items {
                        header.push_str(&format!("  - {}\n", item));
                    }
                }
                scalar => header.push_str(&format!("{} : {}\n", key, scalar)),
            }
        }

        header.push_str(FRONTMATTER_DELIMITER);
        header.push('\n');
        header
    }
}
