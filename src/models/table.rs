use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single coerced cell or field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl TypedValue {
    pub fn empty() -> Self {
        Self::String(String::new())
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Header name to value. Duplicate headers collapse onto one key, last write wins.
pub type Row = BTreeMap<String, TypedValue>;

/// Pairs headers with values positionally, stopping at whichever runs out first.
pub fn zip_row<I>(headers: &[String], values: I) -> Row
where
    I: IntoIterator<Item = TypedValue>,
{
    headers.iter().cloned().zip(values).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTable {
    pub file_name: String,
    pub headers: Vec<String>,
    #[serde(rename = "data")]
    pub rows: Vec<Row>,
    pub total_rows: usize,
}

impl ParsedTable {
    pub fn new(file_name: impl Into<String>, headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            file_name: file_name.into(),
            headers,
            total_rows: rows.len(),
            rows,
        }
    }
}
