//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::path::Path;

use crate::core::value::Row;

/// Read a contributor table from a YAML or JSON file
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML. The
/// document must be a sequence of mappings; an empty document yields no rows.
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read contributor table {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    parse_rows(&content, is_json)
        .wrap_err_with(|| format!("Failed to parse contributor table {}", path.display()))
}

/// Parse a contributor table document
pub fn parse_rows(content: &str, is_json: bool) -> Result<Vec<Row>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    if is_json {
        serde_json::from_str(content).into_diagnostic()
    } else {
        serde_yml::from_str(content).into_diagnostic()
    }
}

/// Horizontal bar for a percentage (max `width` chars)
pub fn percent_bar(pct: f64, width: usize) -> String {
    let len = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    "█".repeat(len)
}
