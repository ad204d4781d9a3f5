//! Analysis pipeline - rows in, report out
//!
//! Chains the three pure stages (build, compute, format) plus the optional
//! Monte Carlo run configured in [`AnalysisConfig`]. Every call builds a fresh
//! chain; nothing is retained between runs.

use tracing::info;

use crate::core::config::AnalysisConfig;
use crate::core::error::AnalysisError;
use crate::core::report::{self, Report};
use crate::core::simulation::simulate;
use crate::core::stackup::compute;
use crate::core::value::Row;
use crate::entities::chain::build_chain;

/// Run a complete analysis of imported rows
pub fn analyze(rows: &[Row], config: &AnalysisConfig) -> Result<Report, AnalysisError> {
    let chain = build_chain(rows)?;
    let result = compute(&chain)?;

    let mut report = report::format(&chain, &result).with_precision(config.precision);

    if let Some(ref target) = config.target {
        report = report.with_target(target, config.marginal_fraction);
    }

    if let Some(ref mc_config) = config.monte_carlo {
        let mc = simulate(&chain, mc_config, config.target.as_ref())?;
        report = report.with_monte_carlo(mc);
    }

    info!(
        contributors = report.contributor_count,
        nominal = report.nominal_resultant,
        "analysis complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{MonteCarloConfig, Target};
    use crate::core::error::ChainError;
    use crate::core::stackup::Verdict;

    fn rows() -> Vec<Row> {
        vec![
            Row::new()
                .with("name", "Housing")
                .with("nominal", 10.0)
                .with("plus_tolerance", 0.1)
                .with("minus_tolerance", 0.1),
            Row::new()
                .with("name", "Shaft")
                .with("nominal", 9.0)
                .with("plus_tolerance", 0.1)
                .with("minus_tolerance", 0.1)
                .with("direction", "subtract"),
        ]
    }

    #[test]
    fn test_default_config_runs_worst_case_and_rss_only() {
        let report = analyze(&rows(), &AnalysisConfig::default()).unwrap();
        assert_eq!(report.contributor_count, 2);
        assert!((report.worst_case.min - 0.8).abs() < 1e-12);
        assert!((report.worst_case.max - 1.2).abs() < 1e-12);
        assert!(report.target.is_none());
        assert!(report.monte_carlo.is_none());
        assert_eq!(report.precision(), 4);
    }

    #[test]
    fn test_target_and_monte_carlo() {
        let config = AnalysisConfig {
            target: Some(Target::new(0.5, 1.5)),
            monte_carlo: Some(MonteCarloConfig {
                iterations: 1000,
                seed: Some(1),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = analyze(&rows(), &config).unwrap();
        let target = report.target.as_ref().unwrap();
        assert_eq!(target.worst_case.verdict, Verdict::Pass);
        assert_eq!(target.statistical.verdict, Verdict::Pass);
        let mc = report.monte_carlo.as_ref().unwrap();
        assert_eq!(mc.iterations, 1000);
        assert_eq!(mc.yield_percent, Some(100.0));
    }

    #[test]
    fn test_errors_propagate() {
        assert_eq!(
            analyze(&[], &AnalysisConfig::default()),
            Err(AnalysisError::Chain(ChainError::EmptyChain))
        );
    }
}
