//! Core module - analysis engine, configuration and errors

pub mod analysis;
pub mod config;
pub mod error;
pub mod report;
pub mod simulation;
pub mod stackup;
pub mod value;

pub use analysis::analyze;
pub use config::{AnalysisConfig, ConfigError, MonteCarloConfig, Target};
pub use error::{AnalysisError, ChainError, ComputationError};
pub use report::{Bounds, ContributorLine, Report, TargetSummary};
pub use simulation::{simulate, simulate_with_samples, MonteCarloResult};
pub use stackup::{compute, variance_contributions, Interval, StackupResult, TargetCheck, Verdict};
pub use value::{CellValue, Row};
