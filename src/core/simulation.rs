//! Monte Carlo simulation of a tolerance chain
//!
//! Each contributor is sampled inside its tolerance zone according to its
//! distribution, signed by direction and summed. Seeded runs are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::{MonteCarloConfig, Target};
use crate::core::error::{ensure_finite, ComputationError};
use crate::entities::chain::ToleranceChain;
use crate::entities::contributor::{Contributor, Distribution};

/// Monte Carlo simulation results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Number of iterations
    pub iterations: u32,

    /// Mean result
    pub mean: f64,

    /// Standard deviation
    pub std_dev: f64,

    /// Minimum value seen
    pub min: f64,

    /// Maximum value seen
    pub max: f64,

    /// Lower percentile (2.5% for 95% CI)
    pub percentile_2_5: f64,

    /// Upper percentile (97.5% for 95% CI)
    pub percentile_97_5: f64,

    /// Percentage of samples within the target limits (when a target is set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_percent: Option<f64>,
}

/// Run a Monte Carlo simulation of the chain
pub fn simulate(
    chain: &ToleranceChain,
    config: &MonteCarloConfig,
    target: Option<&Target>,
) -> Result<MonteCarloResult, ComputationError> {
    let mut samples = draw_samples(chain, config)?;
    summarize(&mut samples, target)
}

/// Run a Monte Carlo simulation and return both results and raw samples
///
/// Samples are returned in draw order.
pub fn simulate_with_samples(
    chain: &ToleranceChain,
    config: &MonteCarloConfig,
    target: Option<&Target>,
) -> Result<(MonteCarloResult, Vec<f64>), ComputationError> {
    let raw_samples = draw_samples(chain, config)?;
    let mut sorted = raw_samples.clone();
    let result = summarize(&mut sorted, target)?;
    Ok((result, raw_samples))
}

/// Sampling zone of one contributor
struct Zone {
    min: f64,
    max: f64,
    center: f64,
}

impl Zone {
    /// Zone `[center - band/2, center + band/2]`, rejected when any bound
    /// or its width is not representable
    fn of(contrib: &Contributor) -> Result<Self, ComputationError> {
        let band = ensure_finite("tolerance band", contrib.tolerance_band())?;
        let center = ensure_finite("tolerance zone center", contrib.zone_center())?;
        let half_band = band / 2.0;
        let zone = Zone {
            min: ensure_finite("tolerance zone lower bound", center - half_band)?,
            max: ensure_finite("tolerance zone upper bound", center + half_band)?,
            center,
        };
        ensure_finite("tolerance zone width", zone.width())?;
        Ok(zone)
    }

    fn width(&self) -> f64 {
        self.max - self.min
    }
}

fn draw_samples(
    chain: &ToleranceChain,
    config: &MonteCarloConfig,
) -> Result<Vec<f64>, ComputationError> {
    let zones = chain.iter().map(Zone::of).collect::<Result<Vec<_>, _>>()?;

    let iterations = config.iterations.max(1);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut samples: Vec<f64> = Vec::with_capacity(iterations as usize);
    for _ in 0..iterations {
        let value: f64 = chain
            .iter()
            .zip(&zones)
            .map(|(c, zone)| {
                c.direction.sign() * sample(zone, c.distribution, config.sigma_level, &mut rng)
            })
            .sum();
        samples.push(ensure_finite("Monte Carlo sample", value)?);
    }

    Ok(samples)
}

/// Statistics over the drawn samples (sorts them in place)
fn summarize(
    samples: &mut [f64],
    target: Option<&Target>,
) -> Result<MonteCarloResult, ComputationError> {
    samples.sort_by(f64::total_cmp);

    let iterations = samples.len() as u32;
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let min = samples.first().copied().unwrap_or(mean);
    let max = samples.last().copied().unwrap_or(mean);

    let p2_5_idx = (n * 0.025) as usize;
    let p97_5_idx = (n * 0.975) as usize;
    let percentile_2_5 = samples.get(p2_5_idx).copied().unwrap_or(min);
    let percentile_97_5 = samples.get(p97_5_idx).copied().unwrap_or(max);

    let yield_percent = target.map(|t| {
        let in_spec = samples.iter().filter(|&&x| t.contains(x)).count();
        in_spec as f64 / n * 100.0
    });

    debug!(iterations, mean, std_dev, "completed Monte Carlo simulation");

    Ok(MonteCarloResult {
        iterations,
        mean: ensure_finite("Monte Carlo mean", mean)?,
        std_dev: ensure_finite("Monte Carlo standard deviation", std_dev)?,
        min,
        max,
        percentile_2_5,
        percentile_97_5,
        yield_percent,
    })
}

/// Draw one value inside a contributor's zone (unsigned)
///
/// The distribution is centred on the middle of the tolerance zone so that
/// unilateral tolerances are sampled inside their zone.
fn sample<R: Rng + ?Sized>(
    zone: &Zone,
    distribution: Distribution,
    sigma_level: f64,
    rng: &mut R,
) -> f64 {
    let width = zone.width();
    let center = zone.center;

    match distribution {
        Distribution::Normal => {
            // Box-Muller; 1 - u keeps u1 in (0, 1] so ln() stays finite
            let sigma = width / sigma_level;
            let u1: f64 = 1.0 - rng.random::<f64>();
            let u2: f64 = rng.random();
            let z = (-2.0_f64 * u1.ln()).sqrt() * (2.0_f64 * std::f64::consts::PI * u2).cos();
            center + sigma * z
        }
        Distribution::Uniform => rng.random_range(zone.min..=zone.max),
        Distribution::Triangular => {
            if width <= 0.0 {
                return center;
            }
            // Symmetric triangular via inverse transform
            let (min, max, mode) = (zone.min, zone.max, center);
            let u: f64 = rng.random();
            let fc = (mode - min) / (max - min);
            if u < fc {
                min + (u * (max - min) * (mode - min)).sqrt()
            } else {
                max - ((1.0 - u) * (max - min) * (max - mode)).sqrt()
            }
        }
    }
}
