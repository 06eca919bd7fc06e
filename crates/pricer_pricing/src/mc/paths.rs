//! Path generation for Monte Carlo simulation.
//!
//! This module implements Geometric Brownian Motion (GBM) simulation with
//! the exact log-space update
//!
//! ```text
//! S(t+dt) = S(t) × exp((r - 0.5σ²)dt + σ√dt × Z)
//! ```
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `values[path_idx * (steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial spot price.

use pricer_models::instruments::OptionParams;
use rayon::prelude::*;

use crate::rng::PricerRng;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// ```text
/// dS = r S dt + σ S dW
/// ```
///
/// under the risk-neutral measure.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.05, 0.2, 1.0);
/// assert!((params.terminal_spot(0.0) - 100.0 * 0.03_f64.exp()).abs() < 1e-10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r) - annualised.
    pub rate: f64,
    /// Volatility (σ) - annualised.
    pub volatility: f64,
    /// Time to maturity (T) - in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
        }
    }

    /// Log drift over `dt`, `(r - 0.5σ²)dt`.
    #[inline]
    pub fn drift(&self, dt: f64) -> f64 {
        (self.rate - 0.5 * self.volatility * self.volatility) * dt
    }

    /// Diffusion scale over `dt`, `σ√dt`.
    #[inline]
    pub fn diffusion(&self, dt: f64) -> f64 {
        self.volatility * dt.sqrt()
    }

    /// Spot at maturity for one standard normal draw.
    #[inline]
    pub fn terminal_spot(&self, z: f64) -> f64 {
        self.spot * (self.drift(self.maturity) + self.diffusion(self.maturity) * z).exp()
    }
}

impl From<&OptionParams> for GbmParams {
    fn from(params: &OptionParams) -> Self {
        Self::new(
            params.spot(),
            params.rate(),
            params.volatility(),
            params.expiry(),
        )
    }
}

/// A batch of simulated GBM paths.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{generate_gbm_paths, GbmParams};
///
/// let paths = generate_gbm_paths(GbmParams::new(100.0, 0.05, 0.2, 1.0), 8, 12, 42);
/// assert_eq!(paths.num_paths(), 8);
/// assert_eq!(paths.path(0).unwrap().len(), 13);
/// assert_eq!(paths.times().len(), 13);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulatedPaths {
    num_paths: usize,
    steps: usize,
    times: Vec<f64>,
    values: Vec<f64>,
}

impl SimulatedPaths {
    /// Number of paths.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Number of time steps per path.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Observation times in years, `0..=T`.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Spots along one path, starting at the initial spot.
    pub fn path(&self, index: usize) -> Option<&[f64]> {
        let width = self.steps + 1;
        (index < self.num_paths).then(|| &self.values[index * width..(index + 1) * width])
    }

    /// Iterator over every path.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.steps + 1)
    }

    /// Final spot of every path.
    pub fn terminal_values(&self) -> Vec<f64> {
        self.iter().filter_map(|path| path.last().copied()).collect()
    }
}

/// Simulates `num_paths` GBM paths of `steps` steps each.
///
/// Path `i` draws from its own stream seeded by `(seed, i)`, so the result
/// is reproducible and independent of how rayon schedules paths. Bounds are
/// checked by the caller.
pub fn generate_gbm_paths(
    params: GbmParams,
    num_paths: usize,
    steps: usize,
    seed: u64,
) -> SimulatedPaths {
    let width = steps + 1;
    let dt = params.maturity / steps as f64;
    let drift_dt = params.drift(dt);
    let vol_sqrt_dt = params.diffusion(dt);

    let mut values = vec![0.0; num_paths * width];
    values
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(path_idx, path)| {
            let mut rng = PricerRng::for_stream(seed, path_idx as u64);
            path[0] = params.spot;
            for step in 0..steps {
                let increment = drift_dt + vol_sqrt_dt * rng.gen_normal();
                path[step + 1] = path[step] * increment.exp();
            }
        });

    let times = (0..width).map(|step| step as f64 * dt).collect();

    SimulatedPaths {
        num_paths,
        steps,
        times,
        values,
    }
}
