//! Output formatting utilities

use serde::Serialize;
use std::io::IsTerminal;

use miette::{IntoDiagnostic, Result};

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, stdout_is_terminal: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if stdout_is_terminal {
                OutputFormat::Text
            } else {
                OutputFormat::Yaml
            }
        }
        other => other,
    }
}

/// Resolve `format` for the current stdout
pub fn resolve_format(format: OutputFormat) -> OutputFormat {
    effective_format(format, std::io::stdout().is_terminal())
}

/// Print a value as YAML or JSON
///
/// Text output is command-specific; callers handle it before reaching here.
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
        }
    }
    Ok(())
}
