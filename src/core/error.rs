//! Engine error types
//!
//! Every failure is all-or-nothing: the engine never returns a partial chain,
//! result or report.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while turning imported rows into a tolerance chain
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ChainError {
    /// A row is missing a field or carries a malformed value
    #[error("Row {row}: invalid '{field}': {reason}")]
    #[diagnostic(
        code(tolchain::validation),
        help("each row needs name, nominal, plus_tolerance and minus_tolerance; direction is optional (+1, -1, add, subtract)")
    )]
    Validation {
        /// Zero-based position of the offending row
        row: usize,
        /// Column name
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// No contributor rows at all
    #[error("Tolerance chain has no contributors")]
    #[diagnostic(
        code(tolchain::empty_chain),
        help("import at least one contributor row before running the analysis")
    )]
    EmptyChain,
}

impl ChainError {
    pub(crate) fn validation(
        row: usize,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ChainError::Validation {
            row,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Non-finite value produced inside the calculator
///
/// Validation rejects non-finite inputs, so this only fires when finite inputs
/// overflow while accumulating. It is fatal for the analysis run.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ComputationError {
    #[error("Stack-up produced a non-finite {quantity} ({value})")]
    #[diagnostic(
        code(tolchain::computation),
        help("contributor magnitudes overflow double precision; rescale the units")
    )]
    NonFinite { quantity: &'static str, value: f64 },
}

/// Any failure of the one-call analysis pipeline
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum AnalysisError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Computation(#[from] ComputationError),
}

/// Reject a non-finite intermediate result
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, ComputationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ComputationError::NonFinite { quantity, value })
    }
}
