//! Monte Carlo pricing engine.
//!
//! Terminal spots are sampled directly from the GBM transition density, so
//! European payoffs need a single draw per path. Paths are split into
//! chunks of [`CHUNK_SIZE`]; each chunk owns a generator seeded from
//! `(seed, chunk)` and a Welford accumulator, and the accumulators are
//! merged in chunk order. A seeded run is therefore bit-reproducible on any
//! number of threads.
//!
//! Greeks are bump-and-revalue with common random numbers: every bumped
//! re-simulation reuses the base seed, hence the same normal draws.

use pricer_core::math::statistics::RunningStats;
use pricer_core::types::PricingError;
use pricer_models::analytical::{DAYS_PER_YEAR, PER_PERCENT};
use pricer_models::instruments::{OptionParams, ParamField};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::config::{MonteCarloConfig, MAX_SAMPLE_PATHS, MAX_STEPS};
use super::paths::{generate_gbm_paths, GbmParams, SimulatedPaths};
use crate::engine::{ModelKind, PricingEngine};
use crate::error::ConfigError;
use crate::greeks::{GreeksResult, PricingResult};
use crate::rng::PricerRng;

/// Paths simulated per rayon task.
pub const CHUNK_SIZE: usize = 4096;

/// Relative spot bump for delta and gamma.
const SPOT_BUMP: f64 = 0.01;

/// Absolute volatility bump for vega.
const VOL_BUMP: f64 = 0.01;

/// Absolute rate bump for rho.
const RATE_BUMP: f64 = 1e-4;

/// Monte Carlo pricing engine for European options.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{OptionParams, OptionType};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
///
/// let engine = MonteCarloEngine::new(
///     MonteCarloConfig::builder().simulations(20_000).seed(42).build().unwrap(),
/// )
/// .unwrap();
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
///
/// let result = engine.price_with_simulations(&params, 20_000, Some(42)).unwrap();
/// let ci = result.confidence_interval.unwrap();
/// assert!(ci.lower < result.price && result.price < ci.upper);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonteCarloEngine {
    config: MonteCarloConfig,
}

impl MonteCarloEngine {
    /// Creates an engine from a configuration.
    ///
    /// # Errors
    /// `InvalidInput` if the configuration is out of bounds.
    pub fn new(config: MonteCarloConfig) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Returns a copy of the engine with a different default seed.
    pub fn with_seed(&self, seed: Option<u64>) -> Self {
        Self {
            config: self.config.clone().with_seed(seed),
        }
    }

    /// Prices with an explicit path count and optional seed.
    ///
    /// Without a seed a fresh one is drawn from thread-local entropy.
    ///
    /// # Errors
    /// - `InvalidInput` if `simulations` is outside `[1, max_simulations]`
    /// - `UnsupportedExercise` for American options
    /// - `NumericalDegeneracy` if the payoff sample is non-finite
    pub fn price_with_simulations(
        &self,
        params: &OptionParams,
        simulations: usize,
        seed: Option<u64>,
    ) -> Result<PricingResult, PricingError> {
        let simulations = self.config.check_simulations(simulations)?;
        if params.exercise().is_american() {
            return Err(PricingError::UnsupportedExercise(format!(
                "{} exercise is not supported by Monte Carlo terminal-value simulation",
                params.exercise()
            )));
        }

        let seed = resolve_seed(seed);
        debug!(
            model = %self.model(),
            simulations,
            seed,
            greeks = self.config.greeks(),
            "pricing"
        );

        let stats = simulate(params, simulations, seed)?;
        let std_error = stats.std_error();
        if std_error == 0.0 && simulations > 1 {
            warn!(
                simulations,
                "discounted payoffs have zero variance; confidence interval collapses to the price"
            );
        }

        let mut result = PricingResult::new(self.model(), stats.mean()).with_std_error(std_error);
        if self.config.greeks() {
            result = result.with_greeks(bumped_greeks(params, simulations, seed, stats.mean())?);
        }
        result.ensure_finite()
    }

    /// Simulates full GBM paths for visualisation.
    ///
    /// # Errors
    /// `InvalidInput` if `num_paths` exceeds 1,000 or `steps` exceeds 10,000.
    pub fn sample_paths(
        &self,
        params: &OptionParams,
        num_paths: usize,
        steps: usize,
    ) -> Result<SimulatedPaths, PricingError> {
        if num_paths == 0 || num_paths > MAX_SAMPLE_PATHS {
            return Err(ConfigError::InvalidPathCount {
                count: num_paths,
                max: MAX_SAMPLE_PATHS,
            }
            .into());
        }
        if steps == 0 || steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount {
                count: steps,
                max: MAX_STEPS,
            }
            .into());
        }

        let seed = resolve_seed(self.config.seed());
        debug!(num_paths, steps, seed, "sampling GBM paths");
        Ok(generate_gbm_paths(
            GbmParams::from(params),
            num_paths,
            steps,
            seed,
        ))
    }
}

impl PricingEngine for MonteCarloEngine {
    fn model(&self) -> ModelKind {
        ModelKind::MonteCarlo
    }

    fn price(&self, params: &OptionParams) -> Result<PricingResult, PricingError> {
        self.price_with_simulations(params, self.config.simulations(), self.config.seed())
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => seed,
        None => {
            let seed: u64 = rand::random();
            debug!(seed, "drew fresh Monte Carlo seed");
            seed
        }
    }
}

/// Discounted payoff statistics over `simulations` terminal draws.
fn simulate(
    params: &OptionParams,
    simulations: usize,
    seed: u64,
) -> Result<RunningStats, PricingError> {
    let gbm = GbmParams::from(params);
    let drift = gbm.drift(gbm.maturity);
    let diffusion = gbm.diffusion(gbm.maturity);
    let discount = params.discount_factor();
    let strike = params.strike();
    let option_type = params.option_type();

    let n_chunks = simulations.div_ceil(CHUNK_SIZE);
    let chunks: Vec<RunningStats> = (0..n_chunks)
        .into_par_iter()
        .map(|chunk| {
            let len = CHUNK_SIZE.min(simulations - chunk * CHUNK_SIZE);
            let mut rng = PricerRng::for_stream(seed, chunk as u64);
            let mut stats = RunningStats::new();
            for _ in 0..len {
                let terminal = gbm.spot * (drift + diffusion * rng.gen_normal()).exp();
                stats.push(discount * option_type.intrinsic(terminal, strike));
            }
            stats
        })
        .collect();

    let stats = chunks.iter().fold(RunningStats::new(), |mut acc, chunk| {
        acc.merge(chunk);
        acc
    });

    if !stats.mean().is_finite() || !stats.sample_variance().is_finite() {
        return Err(PricingError::NumericalDegeneracy(format!(
            "Monte Carlo payoff sample is non-finite (mean {}, variance {})",
            stats.mean(),
            stats.sample_variance()
        )));
    }
    Ok(stats)
}

/// Paired bump-and-revalue Greeks in quoted units.
fn bumped_greeks(
    params: &OptionParams,
    simulations: usize,
    seed: u64,
    base: f64,
) -> Result<GreeksResult, PricingError> {
    let revalue = |field: ParamField, value: f64| -> Result<f64, PricingError> {
        let bumped = params.with_field(field, value)?;
        Ok(simulate(&bumped, simulations, seed)?.mean())
    };

    let spot = params.spot();
    let h = SPOT_BUMP * spot;
    let up = revalue(ParamField::Spot, spot + h)?;
    let down = revalue(ParamField::Spot, spot - h)?;
    let delta = (up - down) / (2.0 * h);
    let gamma = (up - 2.0 * base + down) / (h * h);

    let sigma = params.volatility();
    let vega = if sigma > VOL_BUMP {
        let up = revalue(ParamField::Volatility, sigma + VOL_BUMP)?;
        let down = revalue(ParamField::Volatility, sigma - VOL_BUMP)?;
        (up - down) / (2.0 * VOL_BUMP)
    } else {
        (revalue(ParamField::Volatility, sigma + VOL_BUMP)? - base) / VOL_BUMP
    };

    let rate = params.rate();
    let rho = (revalue(ParamField::Rate, rate + RATE_BUMP)?
        - revalue(ParamField::Rate, rate - RATE_BUMP)?)
        / (2.0 * RATE_BUMP);

    let expiry = params.expiry();
    let dt = (1.0 / DAYS_PER_YEAR).min(expiry / 2.0);
    let theta = (revalue(ParamField::Expiry, expiry - dt)? - base) / dt;

    Ok(GreeksResult {
        delta: Some(delta),
        gamma: Some(gamma),
        vega: Some(vega / PER_PERCENT),
        theta: Some(theta / DAYS_PER_YEAR),
        rho: Some(rho / PER_PERCENT),
    })
}
