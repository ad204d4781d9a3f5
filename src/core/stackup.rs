//! Stack-up calculator - worst-case and RSS resultant of a tolerance chain
//!
//! Worst-case sums every contributor at its extreme simultaneously. The
//! statistical bound combines the same per-contributor terms by root-sum-square,
//! which assumes independent contributors; it is a simplification, not a true
//! convolution of distributions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::Target;
use crate::core::error::{ensure_finite, ComputationError};
use crate::entities::chain::ToleranceChain;

/// Result of analysing one chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackupResult {
    /// Σ direction × nominal
    pub nominal_resultant: f64,

    /// Upward worst-case deviation of the resultant
    pub worst_case_plus: f64,

    /// Downward worst-case deviation of the resultant
    pub worst_case_minus: f64,

    /// Upward RSS deviation of the resultant
    pub statistical_plus: f64,

    /// Downward RSS deviation of the resultant
    pub statistical_minus: f64,
}

/// Closed interval of resultant values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Check the interval against a target specification
    ///
    /// Margin is the smaller distance from the interval to either limit
    /// (negative when a limit is exceeded).
    pub fn check(&self, target: &Target, marginal_fraction: f64) -> TargetCheck {
        let upper_margin = target.upper_limit - self.max;
        let lower_margin = self.min - target.lower_limit;
        let margin = upper_margin.min(lower_margin);

        let marginal_threshold = target.band() * marginal_fraction;
        let verdict = if margin > marginal_threshold {
            Verdict::Pass
        } else if margin > 0.0 {
            Verdict::Marginal
        } else {
            Verdict::Fail
        };

        TargetCheck { margin, verdict }
    }
}

/// Analysis result classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Within specification
    Pass,
    /// Within specification but close to a limit
    Marginal,
    /// Out of specification
    Fail,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Marginal => write!(f, "marginal"),
            Verdict::Fail => write!(f, "fail"),
        }
    }
}

/// Margin and verdict of an interval against a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetCheck {
    pub margin: f64,
    pub verdict: Verdict,
}

impl StackupResult {
    /// `[nominal - worst_case_minus, nominal + worst_case_plus]`
    pub fn worst_case_interval(&self) -> Interval {
        Interval {
            min: self.nominal_resultant - self.worst_case_minus,
            max: self.nominal_resultant + self.worst_case_plus,
        }
    }

    /// `[nominal - statistical_minus, nominal + statistical_plus]`
    pub fn statistical_interval(&self) -> Interval {
        Interval {
            min: self.nominal_resultant - self.statistical_minus,
            max: self.nominal_resultant + self.statistical_plus,
        }
    }
}

/// Compute worst-case and statistical stack-up bounds for a chain
///
/// Subtracting contributors swap their tolerances before summing (see
/// [`Contributor::resultant_tolerances`](crate::entities::Contributor::resultant_tolerances)).
/// Deterministic: the same chain always yields a bit-identical result.
pub fn compute(chain: &ToleranceChain) -> Result<StackupResult, ComputationError> {
    let mut nominal = 0.0;
    let mut wc_plus = 0.0;
    let mut wc_minus = 0.0;
    let mut rss_plus: f64 = 0.0;
    let mut rss_minus: f64 = 0.0;

    for contrib in chain {
        let (up, down) = contrib.resultant_tolerances();
        nominal += contrib.signed_nominal();
        wc_plus += up;
        wc_minus += down;
        // hypot keeps the running root finite where the squares would overflow
        rss_plus = rss_plus.hypot(up);
        rss_minus = rss_minus.hypot(down);
    }

    let result = StackupResult {
        nominal_resultant: ensure_finite("nominal resultant", nominal)?,
        worst_case_plus: ensure_finite("worst-case plus tolerance", wc_plus)?,
        worst_case_minus: ensure_finite("worst-case minus tolerance", wc_minus)?,
        statistical_plus: ensure_finite("statistical plus tolerance", rss_plus)?,
        statistical_minus: ensure_finite("statistical minus tolerance", rss_minus)?,
    };

    debug!(
        contributors = chain.len(),
        nominal = result.nominal_resultant,
        wc_plus = result.worst_case_plus,
        wc_minus = result.worst_case_minus,
        rss_plus = result.statistical_plus,
        rss_minus = result.statistical_minus,
        "computed stack-up"
    );

    Ok(result)
}

/// Variance contribution percentage of each contributor
///
/// `band_i² / Σ band_j² × 100`, in chain order. All zeros when every
/// contributor has a zero tolerance band.
pub fn variance_contributions(chain: &ToleranceChain) -> Vec<f64> {
    let bands: Vec<f64> = chain.iter().map(|c| c.tolerance_band()).collect();
    let largest = bands.iter().copied().fold(0.0_f64, f64::max);
    if !(largest > 0.0 && largest.is_finite()) {
        return vec![0.0; bands.len()];
    }

    // Scaled by the widest band so the squares cannot overflow
    let squares: Vec<f64> = bands
        .iter()
        .map(|band| {
            let scaled = band / largest;
            scaled * scaled
        })
        .collect();
    let total: f64 = squares.iter().sum();

    squares.iter().map(|s| s / total * 100.0).collect()
}
