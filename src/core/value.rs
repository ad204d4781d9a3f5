//! Tabular input - rows of named cells handed over by an importer
//!
//! A [`Row`] is one line of an imported table: a mapping from column name to
//! [`CellValue`]. Column lookup ignores case and surrounding whitespace so
//! headers such as `" Nominal "` and `nominal` address the same cell.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single cell of imported tabular data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric cell
    Number(f64),
    /// Boolean cell (never valid for a dimension, kept for faithful errors)
    Bool(bool),
    /// Free text, possibly holding a number (`"10.5"`)
    Text(String),
    /// Blank cell / null
    Empty,
}

impl CellValue {
    /// True for null cells and whitespace-only text
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the cell; numeric text is parsed
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Text view of the cell; numbers are rendered, blanks yield `None`
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Text(s) => write!(f, "\"{}\"", s),
            CellValue::Empty => write!(f, "<empty>"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// One imported row: column name to cell value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a cell, replacing any previous value for the column
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Look up a cell by column name (case-insensitive, whitespace-trimmed)
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        let wanted = column.trim();
        self.cells
            .get(wanted)
            .or_else(|| {
                self.cells
                    .iter()
                    .find(|(k, _)| k.trim().eq_ignore_ascii_case(wanted))
                    .map(|(_, v)| v)
            })
    }

    /// Look up a cell, treating blank cells as absent
    pub fn get_present(&self, column: &str) -> Option<&CellValue> {
        self.get(column).filter(|v| !v.is_blank())
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}
