//! Monte Carlo simulation configuration.
//!
//! This module provides [`MonteCarloConfig`] and its builder. Bounds are
//! checked once at build time; per-call overrides are checked against the
//! configured maximum.

use crate::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Default number of simulation paths.
pub const DEFAULT_SIMULATIONS: usize = 10_000;

/// Maximum number of time steps allowed per sampled path.
pub const MAX_STEPS: usize = 10_000;

/// Maximum number of paths returned for visualisation.
pub const MAX_SAMPLE_PATHS: usize = 1_000;

/// Monte Carlo simulation configuration.
///
/// Immutable once built. Use [`MonteCarloConfigBuilder`] to construct
/// instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .simulations(50_000)
///     .seed(42)
///     .greeks(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.simulations(), 50_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    /// Number of simulation paths.
    simulations: usize,
    /// Largest path count accepted by per-call overrides.
    max_simulations: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Whether to estimate Greeks by bump-and-revalue.
    greeks: bool,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn simulations(&self) -> usize {
        self.simulations
    }

    /// Returns the largest accepted path count.
    #[inline]
    pub fn max_simulations(&self) -> usize {
        self.max_simulations
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns whether Greeks are estimated.
    #[inline]
    pub fn greeks(&self) -> bool {
        self.greeks
    }

    /// Returns a copy with the seed replaced.
    ///
    /// The seed takes no part in validation, so the copy stays valid.
    #[inline]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `max_simulations` is 0 or greater than 10,000,000
    /// - `simulations` is 0 or greater than `max_simulations`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_simulations == 0 || self.max_simulations > MAX_PATHS {
            return Err(ConfigError::InvalidParameter {
                name: "max_simulations",
                value: format!("{} is outside [1, {}]", self.max_simulations, MAX_PATHS),
            });
        }
        self.check_simulations(self.simulations).map(|_| ())
    }

    /// Returns `simulations` if it lies in `[1, max_simulations]`.
    #[inline]
    pub fn check_simulations(&self, simulations: usize) -> Result<usize, ConfigError> {
        if simulations == 0 || simulations > self.max_simulations {
            return Err(ConfigError::InvalidPathCount {
                count: simulations,
                max: self.max_simulations,
            });
        }
        Ok(simulations)
    }
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            simulations: DEFAULT_SIMULATIONS,
            max_simulations: MAX_PATHS,
            seed: None,
            greeks: false,
        }
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Unset fields take the defaults: 10,000 simulations, the hard path cap,
/// no seed and no Greeks.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    simulations: Option<usize>,
    max_simulations: Option<usize>,
    seed: Option<u64>,
    greeks: bool,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn simulations(mut self, simulations: usize) -> Self {
        self.simulations = Some(simulations);
        self
    }

    /// Lowers the path cap for per-call overrides.
    #[inline]
    pub fn max_simulations(mut self, max_simulations: usize) -> Self {
        self.max_simulations = Some(max_simulations);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed; `None` draws a fresh seed per call.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables Greek estimation.
    #[inline]
    pub fn greeks(mut self, greeks: bool) -> Self {
        self.greeks = greeks;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either path count is out of bounds.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let config = MonteCarloConfig {
            simulations: self.simulations.unwrap_or(DEFAULT_SIMULATIONS),
            max_simulations: self.max_simulations.unwrap_or(MAX_PATHS),
            seed: self.seed,
            greeks: self.greeks,
        };

        config.validate()?;
        Ok(config)
    }
}
