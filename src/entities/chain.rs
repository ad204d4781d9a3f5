//! Tolerance chain - ordered, validated sequence of contributors
//!
//! A chain is built fresh from imported rows on every analysis request and is
//! never mutated afterwards.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::core::error::ChainError;
use crate::core::value::Row;
use crate::entities::contributor::{columns, Contributor};

/// An ordered, non-empty sequence of contributors forming one resultant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ToleranceChain {
    contributors: Vec<Contributor>,
}

impl ToleranceChain {
    /// Build a chain from already-typed contributors
    ///
    /// Enforces the same invariants as [`build_chain`]: at least one
    /// contributor, finite values, non-negative tolerances, unique names.
    pub fn new(contributors: Vec<Contributor>) -> Result<Self, ChainError> {
        if contributors.is_empty() {
            return Err(ChainError::EmptyChain);
        }

        let mut seen = HashSet::with_capacity(contributors.len());
        for (index, contributor) in contributors.iter().enumerate() {
            contributor.validate(index)?;
            if !seen.insert(contributor.name.as_str()) {
                return Err(ChainError::validation(
                    index,
                    columns::NAME,
                    format!("duplicate contributor name '{}'", contributor.name),
                ));
            }
        }

        Ok(Self { contributors })
    }

    /// Contributors in chain order
    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contributor> {
        self.contributors.iter()
    }

    /// Number of contributors
    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    /// Always false for a constructed chain
    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    /// Look up a contributor by name
    pub fn get(&self, name: &str) -> Option<&Contributor> {
        self.contributors.iter().find(|c| c.name == name)
    }
}

impl<'a> IntoIterator for &'a ToleranceChain {
    type Item = &'a Contributor;
    type IntoIter = std::slice::Iter<'a, Contributor>;

    fn into_iter(self) -> Self::IntoIter {
        self.contributors.iter()
    }
}

/// Validate imported rows and structure them into a tolerance chain
///
/// Rows are processed in order; the first malformed row aborts the build with
/// a [`ChainError::Validation`] naming its index and field.
pub fn build_chain(rows: &[Row]) -> Result<ToleranceChain, ChainError> {
    if rows.is_empty() {
        warn!("analysis requested with no contributor rows");
        return Err(ChainError::EmptyChain);
    }

    let contributors = rows
        .iter()
        .enumerate()
        .map(|(index, row)| Contributor::from_row(index, row))
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| warn!(error = %e, "rejected contributor row"))?;

    let chain = ToleranceChain::new(contributors)?;
    debug!(contributors = chain.len(), "built tolerance chain");
    Ok(chain)
}
