//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tolchain::core::value::Row;

/// Helper to get a tolchain command
pub fn tolchain() -> Command {
    Command::new(cargo::cargo_bin!("tolchain"))
}

/// Build a contributor row with symmetric tolerance
pub fn row(name: &str, nominal: f64, tol: f64, direction: &str) -> Row {
    Row::new()
        .with("name", name)
        .with("nominal", nominal)
        .with("plus_tolerance", tol)
        .with("minus_tolerance", tol)
        .with("direction", direction)
}

/// The two-part gap: A 10.0 ±0.1 (+1), B 5.0 ±0.05 (-1)
pub fn two_part_rows() -> Vec<Row> {
    vec![row("A", 10.0, 0.1, "add"), row("B", 5.0, 0.05, "subtract")]
}

/// YAML contributor table for the two-part gap
pub const TWO_PART_YAML: &str = "\
- name: A
  nominal: 10.0
  plus_tolerance: 0.1
  minus_tolerance: 0.1
  direction: 1
- name: B
  nominal: 5.0
  plus_tolerance: 0.05
  minus_tolerance: 0.05
  direction: -1
";

/// Write a file into a fresh temp directory and return both
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    (tmp, path)
}
