//! Analysis configuration
//!
//! Loaded from YAML (`serde_yml`). Every field has a default, so an empty
//! document is a valid configuration that runs plain worst-case/RSS analysis.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Failed to parse YAML: {message}")]
    YamlError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Target/gap specification the resultant is checked against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Name of the target dimension/gap
    #[serde(default = "default_target_name")]
    pub name: String,

    /// Lower specification limit
    pub lower_limit: f64,

    /// Upper specification limit
    pub upper_limit: f64,

    /// Units
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_target_name() -> String {
    "resultant".to_string()
}

fn default_units() -> String {
    "mm".to_string()
}

impl Target {
    pub fn new(lower_limit: f64, upper_limit: f64) -> Self {
        Self {
            name: default_target_name(),
            lower_limit,
            upper_limit,
            units: default_units(),
        }
    }

    /// Width of the specification band (USL - LSL)
    pub fn band(&self) -> f64 {
        self.upper_limit - self.lower_limit
    }

    /// True when `value` lies within the limits (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower_limit && value <= self.upper_limit
    }
}

/// Monte Carlo simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Number of samples drawn
    pub iterations: u32,

    /// Sigma level for normal contributors (tolerance band = sigma_level × σ)
    /// Default 6.0 means the band spans ±3σ
    pub sigma_level: f64,

    /// RNG seed; `None` draws from OS entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            sigma_level: 6.0,
            seed: None,
        }
    }
}

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Optional specification limits for pass/marginal/fail verdicts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,

    /// A positive margin below this fraction of the target band is "marginal"
    pub marginal_fraction: f64,

    /// Run a Monte Carlo simulation in addition to worst-case/RSS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<MonteCarloConfig>,

    /// Decimal places used by the text rendering of reports
    pub precision: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target: None,
            marginal_fraction: 0.1,
            monte_carlo: None,
            precision: 4,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(contents).map_err(|e| ConfigError::YamlError {
                message: e.to_string(),
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref target) = self.target {
            if !target.lower_limit.is_finite() || !target.upper_limit.is_finite() {
                return Err(ConfigError::Invalid {
                    field: "target",
                    reason: "limits must be finite".to_string(),
                });
            }
            if target.lower_limit > target.upper_limit {
                return Err(ConfigError::Invalid {
                    field: "target",
                    reason: format!(
                        "lower limit {} is above upper limit {}",
                        target.lower_limit, target.upper_limit
                    ),
                });
            }
        }

        if !(0.0..1.0).contains(&self.marginal_fraction) {
            return Err(ConfigError::Invalid {
                field: "marginal_fraction",
                reason: format!("must be in [0, 1), got {}", self.marginal_fraction),
            });
        }

        if let Some(ref mc) = self.monte_carlo {
            if mc.iterations == 0 {
                return Err(ConfigError::Invalid {
                    field: "monte_carlo.iterations",
                    reason: "must be at least 1".to_string(),
                });
            }
            if !(mc.sigma_level.is_finite() && mc.sigma_level > 0.0) {
                return Err(ConfigError::Invalid {
                    field: "monte_carlo.sigma_level",
                    reason: format!("must be positive, got {}", mc.sigma_level),
                });
            }
        }

        Ok(())
    }
}
