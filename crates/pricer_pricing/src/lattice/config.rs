//! Binomial lattice configuration.

use crate::error::ConfigError;

/// Hard cap on lattice steps.
pub const MAX_TREE_STEPS: usize = 10_000;

/// Default number of lattice steps.
pub const DEFAULT_TREE_STEPS: usize = 100;

/// Largest lattice that can be captured as a full [`super::BinomialTree`].
pub const MAX_SNAPSHOT_STEPS: usize = 500;

/// Step bounds for [`super::BinomialTreeEngine`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::LatticeConfig;
///
/// let config = LatticeConfig::new(500, 2_000).unwrap();
/// assert_eq!(config.steps(), 500);
/// assert!(LatticeConfig::new(3_000, 2_000).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeConfig {
    steps: usize,
    max_steps: usize,
}

impl LatticeConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// - `InvalidParameter` if `max_steps` is 0 or above [`MAX_TREE_STEPS`]
    /// - `InvalidStepCount` if `steps` is outside `[1, max_steps]`
    pub fn new(steps: usize, max_steps: usize) -> Result<Self, ConfigError> {
        let config = Self { steps, max_steps };
        config.validate()?;
        Ok(config)
    }

    /// Configuration with the given default step count and the hard cap.
    pub fn with_steps(steps: usize) -> Result<Self, ConfigError> {
        Self::new(steps, MAX_TREE_STEPS)
    }

    /// Default step count.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Largest accepted step count.
    #[inline]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Checks both bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 || self.max_steps > MAX_TREE_STEPS {
            return Err(ConfigError::InvalidParameter {
                name: "max_steps",
                value: format!("{} is outside [1, {}]", self.max_steps, MAX_TREE_STEPS),
            });
        }
        self.check_steps(self.steps).map(|_| ())
    }

    /// Returns `steps` if it lies in `[1, max_steps]`.
    #[inline]
    pub fn check_steps(&self, steps: usize) -> Result<usize, ConfigError> {
        if steps == 0 || steps > self.max_steps {
            return Err(ConfigError::InvalidStepCount {
                count: steps,
                max: self.max_steps,
            });
        }
        Ok(steps)
    }
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_TREE_STEPS,
            max_steps: MAX_TREE_STEPS,
        }
    }
}
