//! Contributor entity - one dimension of a tolerance chain
//!
//! A contributor carries a nominal value, an unsigned plus/minus tolerance pair
//! and a direction telling whether it adds to or subtracts from the resultant.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::ChainError;
use crate::core::value::{CellValue, Row};

/// Column names read from imported rows
pub mod columns {
    pub const NAME: &str = "name";
    pub const NOMINAL: &str = "nominal";
    pub const PLUS_TOLERANCE: &str = "plus_tolerance";
    pub const MINUS_TOLERANCE: &str = "minus_tolerance";
    pub const DIRECTION: &str = "direction";
    pub const DISTRIBUTION: &str = "distribution";
    pub const SOURCE: &str = "source";
}

/// Direction of contributor in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Direction {
    /// Adds to the resultant (+1)
    #[default]
    Positive,
    /// Subtracts from the resultant (-1)
    Negative,
}

impl Direction {
    /// Numeric sign, +1.0 or -1.0
    pub fn sign(self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }

    /// Map a numeric sign; only exactly +1 and -1 are accepted
    pub fn from_sign(sign: f64) -> Option<Self> {
        if sign == 1.0 {
            Some(Direction::Positive)
        } else if sign == -1.0 {
            Some(Direction::Negative)
        } else {
            None
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" | "+1" | "1" | "1.0" | "+1.0" => Ok(Direction::Positive),
            "subtract" | "-1" | "-1.0" => Ok(Direction::Negative),
            _ => Err(format!(
                "Invalid direction: '{}'. Use +1, -1, 'add' or 'subtract'",
                s.trim()
            )),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Positive => write!(f, "+1"),
            Direction::Negative => write!(f, "-1"),
        }
    }
}

/// Statistical distribution assumed for Monte Carlo sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Distribution {
    /// Normal (Gaussian) distribution
    #[default]
    Normal,
    /// Uniform distribution across the tolerance zone
    Uniform,
    /// Triangular distribution peaking at the zone centre
    Triangular,
}

impl FromStr for Distribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "gaussian" => Ok(Distribution::Normal),
            "uniform" => Ok(Distribution::Uniform),
            "triangular" => Ok(Distribution::Triangular),
            _ => Err(format!(
                "Invalid distribution: '{}'. Use normal, uniform or triangular",
                s.trim()
            )),
        }
    }
}

impl std::fmt::Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distribution::Normal => write!(f, "normal"),
            Distribution::Uniform => write!(f, "uniform"),
            Distribution::Triangular => write!(f, "triangular"),
        }
    }
}

/// A contributor to the tolerance chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    /// Contributor name, unique within its chain
    pub name: String,

    /// Nominal value
    pub nominal: f64,

    /// Plus tolerance (non-negative)
    pub plus_tolerance: f64,

    /// Minus tolerance (non-negative)
    pub minus_tolerance: f64,

    /// Direction of contribution
    #[serde(default)]
    pub direction: Direction,

    /// Statistical distribution for Monte Carlo
    #[serde(default)]
    pub distribution: Distribution,

    /// Source reference (drawing number, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Contributor {
    /// Create a contributor with a normal distribution and no source
    pub fn new(
        name: impl Into<String>,
        nominal: f64,
        plus_tolerance: f64,
        minus_tolerance: f64,
        direction: Direction,
    ) -> Self {
        Self {
            name: name.into(),
            nominal,
            plus_tolerance,
            minus_tolerance,
            direction,
            distribution: Distribution::default(),
            source: None,
        }
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Parse one imported row
    ///
    /// `index` is the row's position in the import and is reported in errors.
    pub fn from_row(index: usize, row: &Row) -> Result<Self, ChainError> {
        let name = row
            .get_present(columns::NAME)
            .and_then(CellValue::as_text)
            .ok_or_else(|| ChainError::validation(index, columns::NAME, "missing value"))?;

        let nominal = required_number(index, row, columns::NOMINAL)?;
        let plus_tolerance = required_number(index, row, columns::PLUS_TOLERANCE)?;
        let minus_tolerance = required_number(index, row, columns::MINUS_TOLERANCE)?;

        let direction = match row.get_present(columns::DIRECTION) {
            None => Direction::default(),
            Some(cell) => parse_direction(cell)
                .map_err(|reason| ChainError::validation(index, columns::DIRECTION, reason))?,
        };

        let distribution = match row.get_present(columns::DISTRIBUTION) {
            None => Distribution::default(),
            Some(cell) => cell
                .as_text()
                .ok_or_else(|| format!("expected text, got {}", cell))
                .and_then(|s| s.parse())
                .map_err(|reason| ChainError::validation(index, columns::DISTRIBUTION, reason))?,
        };

        let source = row.get_present(columns::SOURCE).and_then(CellValue::as_text);

        let contributor = Self {
            name,
            nominal,
            plus_tolerance,
            minus_tolerance,
            direction,
            distribution,
            source,
        };
        contributor.validate(index)?;
        Ok(contributor)
    }

    /// Check the numeric invariants: finite values, non-negative tolerances
    pub fn validate(&self, index: usize) -> Result<(), ChainError> {
        if self.name.trim().is_empty() {
            return Err(ChainError::validation(index, columns::NAME, "missing value"));
        }
        for (field, value) in [
            (columns::NOMINAL, self.nominal),
            (columns::PLUS_TOLERANCE, self.plus_tolerance),
            (columns::MINUS_TOLERANCE, self.minus_tolerance),
        ] {
            if !value.is_finite() {
                return Err(ChainError::validation(
                    index,
                    field,
                    format!("value must be finite, got {}", value),
                ));
            }
        }
        for (field, value) in [
            (columns::PLUS_TOLERANCE, self.plus_tolerance),
            (columns::MINUS_TOLERANCE, self.minus_tolerance),
        ] {
            if value < 0.0 {
                return Err(ChainError::validation(
                    index,
                    field,
                    format!("tolerance must be non-negative, got {}", value),
                ));
            }
        }
        Ok(())
    }

    /// Nominal value with the direction applied
    pub fn signed_nominal(&self) -> f64 {
        self.direction.sign() * self.nominal
    }

    /// Total tolerance band (plus + minus)
    pub fn tolerance_band(&self) -> f64 {
        self.plus_tolerance + self.minus_tolerance
    }

    /// Tolerances as seen by the resultant: `(upward, downward)`
    ///
    /// A subtracting contributor at its minus limit pushes the resultant up,
    /// so the pair is swapped for `Direction::Negative`.
    pub fn resultant_tolerances(&self) -> (f64, f64) {
        match self.direction {
            Direction::Positive => (self.plus_tolerance, self.minus_tolerance),
            Direction::Negative => (self.minus_tolerance, self.plus_tolerance),
        }
    }

    /// Centre of the tolerance zone (nominal shifted for unilateral tolerances)
    pub fn zone_center(&self) -> f64 {
        self.nominal + (self.plus_tolerance - self.minus_tolerance) / 2.0
    }
}

fn required_number(index: usize, row: &Row, field: &str) -> Result<f64, ChainError> {
    let cell = row
        .get_present(field)
        .ok_or_else(|| ChainError::validation(index, field, "missing value"))?;
    cell.as_number()
        .ok_or_else(|| ChainError::validation(index, field, format!("expected a number, got {}", cell)))
}

fn parse_direction(cell: &CellValue) -> Result<Direction, String> {
    match cell {
        CellValue::Number(n) => Direction::from_sign(*n).ok_or_else(|| {
            format!(
                "Invalid direction: {}. Use +1, -1, 'add' or 'subtract'",
                n
            )
        }),
        CellValue::Text(s) => s.parse(),
        other => Err(format!(
            "Invalid direction: {}. Use +1, -1, 'add' or 'subtract'",
            other
        )),
    }
}
