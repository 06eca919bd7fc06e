//! Engine configuration errors.
//!
//! Raised when a lattice or Monte Carlo engine is configured (or invoked)
//! with a step or path count outside its bounds.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Configuration error for the lattice and Monte Carlo engines.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside `[1, max]`.
    #[error("Invalid path count {count}: must be in range [1, {max}]")]
    InvalidPathCount {
        /// Requested number of paths
        count: usize,
        /// Largest accepted number of paths
        max: usize,
    },

    /// Step count outside `[1, max]`.
    #[error("Invalid step count {count}: must be in range [1, {max}]")]
    InvalidStepCount {
        /// Requested number of steps
        count: usize,
        /// Largest accepted number of steps
        max: usize,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
