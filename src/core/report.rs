//! Report formatter - structured, presentation-neutral analysis report
//!
//! A [`Report`] is a plain key/value structure: serialize it (YAML, JSON) or
//! print it through its `Display` implementation. Nothing here knows about
//! widgets or terminals.

use serde::Serialize;
use std::fmt;

use crate::core::config::Target;
use crate::core::simulation::MonteCarloResult;
use crate::core::stackup::{variance_contributions, Interval, StackupResult, TargetCheck};
use crate::entities::chain::ToleranceChain;
use crate::entities::contributor::Direction;

const DEFAULT_PRECISION: usize = 4;

/// Resultant deviations and the interval they span
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// Lower end of the resultant interval
    pub min: f64,
    /// Upper end of the resultant interval
    pub max: f64,
    /// Upward deviation from the nominal resultant
    pub plus: f64,
    /// Downward deviation from the nominal resultant
    pub minus: f64,
}

impl Bounds {
    fn new(interval: Interval, plus: f64, minus: f64) -> Self {
        Self {
            min: interval.min,
            max: interval.max,
            plus,
            minus,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval {
            min: self.min,
            max: self.max,
        }
    }
}

/// One contributor line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributorLine {
    pub name: String,
    pub direction: Direction,
    pub nominal: f64,
    pub plus_tolerance: f64,
    pub minus_tolerance: f64,
    /// Share of the total variance, in percent
    pub variance_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Verdicts against the configured target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSummary {
    #[serde(flatten)]
    pub target: Target,
    pub worst_case: TargetCheck,
    pub statistical: TargetCheck,
}

/// Structured analysis report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Number of contributors in the chain
    pub contributor_count: usize,

    /// Σ direction × nominal
    pub nominal_resultant: f64,

    /// Worst-case interval `[nominal - wc_minus, nominal + wc_plus]`
    pub worst_case: Bounds,

    /// Statistical (RSS) interval `[nominal - rss_minus, nominal + rss_plus]`
    pub statistical: Bounds,

    /// Per-contributor breakdown in chain order
    pub contributors: Vec<ContributorLine>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<MonteCarloResult>,

    /// Decimal places for the text rendering
    #[serde(skip)]
    precision: usize,
}

/// Render a stack-up result and its source chain into a report
pub fn format(chain: &ToleranceChain, result: &StackupResult) -> Report {
    let contributors = chain
        .iter()
        .zip(variance_contributions(chain))
        .map(|(c, variance_percent)| ContributorLine {
            name: c.name.clone(),
            direction: c.direction,
            nominal: c.nominal,
            plus_tolerance: c.plus_tolerance,
            minus_tolerance: c.minus_tolerance,
            variance_percent,
            source: c.source.clone(),
        })
        .collect();

    Report {
        contributor_count: chain.len(),
        nominal_resultant: result.nominal_resultant,
        worst_case: Bounds::new(
            result.worst_case_interval(),
            result.worst_case_plus,
            result.worst_case_minus,
        ),
        statistical: Bounds::new(
            result.statistical_interval(),
            result.statistical_plus,
            result.statistical_minus,
        ),
        contributors,
        target: None,
        monte_carlo: None,
        precision: DEFAULT_PRECISION,
    }
}

impl Report {
    /// Attach pass/marginal/fail verdicts for both intervals
    pub fn with_target(mut self, target: &Target, marginal_fraction: f64) -> Self {
        self.target = Some(TargetSummary {
            target: target.clone(),
            worst_case: self.worst_case.interval().check(target, marginal_fraction),
            statistical: self.statistical.interval().check(target, marginal_fraction),
        });
        self
    }

    /// Attach a Monte Carlo summary
    pub fn with_monte_carlo(mut self, monte_carlo: MonteCarloResult) -> Self {
        self.monte_carlo = Some(monte_carlo);
        self
    }

    /// Decimal places used by `Display`
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn precision(&self) -> usize {
        self.precision
    }
}

fn write_indented(f: &mut fmt::Formatter<'_>, indent: &str, body: &str) -> fmt::Result {
    for line in body.lines() {
        writeln!(f, "{}{}", indent, line)?;
    }
    Ok(())
}

impl fmt::Display for Bounds {
    /// `Range` and `Tolerance` lines; `{:.N}` sets the decimal places
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(DEFAULT_PRECISION);
        writeln!(f, "Range: {:.*} to {:.*}", p, self.min, p, self.max)?;
        write!(f, "Tolerance: +{:.*} / -{:.*}", p, self.plus, p, self.minus)
    }
}

impl fmt::Display for MonteCarloResult {
    /// Summary statistics, one per line; `{:.N}` sets the decimal places
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(DEFAULT_PRECISION);
        writeln!(f, "Mean: {:.*}", p, self.mean)?;
        writeln!(f, "Std Dev: {:.*}", p, self.std_dev)?;
        writeln!(f, "Range: {:.*} to {:.*}", p, self.min, p, self.max)?;
        write!(
            f,
            "95% Interval: {:.*} to {:.*}",
            p, self.percentile_2_5, p, self.percentile_97_5
        )?;
        if let Some(yield_percent) = self.yield_percent {
            write!(f, "\nYield: {:.2}%", yield_percent)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision;

        writeln!(f, "Contributors: {}", self.contributor_count)?;
        writeln!(f, "Nominal resultant: {:.*}", p, self.nominal_resultant)?;

        if let Some(ref target) = self.target {
            writeln!(
                f,
                "Target {}: [{:.*}, {:.*}] {}",
                target.target.name,
                p,
                target.target.lower_limit,
                p,
                target.target.upper_limit,
                target.target.units
            )?;
        }

        let checks = self.target.as_ref().map(|t| (t.worst_case, t.statistical));
        for (label, bounds, check) in [
            ("Worst-case", &self.worst_case, checks.map(|c| c.0)),
            ("Statistical", &self.statistical, checks.map(|c| c.1)),
        ] {
            writeln!(f)?;
            writeln!(f, "{}:", label)?;
            write_indented(f, "  ", &format!("{:.*}", p, bounds))?;
            if let Some(check) = check {
                writeln!(f, "  Margin: {:.*}", p, check.margin)?;
                writeln!(f, "  Result: {}", check.verdict)?;
            }
        }

        if !self.contributors.is_empty() {
            writeln!(f)?;
            writeln!(f, "Contributions:")?;
            for line in &self.contributors {
                writeln!(
                    f,
                    "  {} {} {:.*} +{:.*}/-{:.*} ({:.1}% of variance)",
                    line.direction,
                    line.name,
                    p,
                    line.nominal,
                    p,
                    line.plus_tolerance,
                    p,
                    line.minus_tolerance,
                    line.variance_percent
                )?;
            }
        }

        if let Some(ref mc) = self.monte_carlo {
            writeln!(f)?;
            writeln!(f, "Monte Carlo ({} iterations):", mc.iterations)?;
            write_indented(f, "  ", &format!("{:.*}", p, mc))?;
        }

        Ok(())
    }
}
