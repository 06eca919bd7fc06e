//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors surfaced by every pricing and analytics operation
//! - `SolverError`: Errors from root-finding solvers

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Every engine, the implied volatility solver and the analytics layer
/// report failures through this type. Module-level errors convert into it
/// via `From`.
///
/// # Variants
/// - `InvalidInput`: Parameters rejected by validation (never clamped)
/// - `UnsupportedExercise`: Exercise style the chosen model cannot price
/// - `ConvergenceFailure`: Iterative solver exhausted its iteration budget
/// - `NumericalDegeneracy`: Computation would produce NaN/∞ or is ill-posed
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// assert!(err.is_validation());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Exercise style not supported by the selected model
    UnsupportedExercise(String),

    /// Root finder failed to meet tolerance
    ConvergenceFailure {
        /// Last iterate before giving up
        estimate: f64,
        /// Iterations performed
        iterations: usize,
    },

    /// Degenerate numerical configuration (would yield NaN or infinity)
    NumericalDegeneracy(String),
}

impl PricingError {
    /// Returns `true` for errors caused by caller input.
    ///
    /// Validation errors are surfaced immediately and never retried.
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidInput(_) | PricingError::UnsupportedExercise(_)
        )
    }

    /// Returns `true` if a root finder failed to converge.
    #[inline]
    pub fn is_convergence(&self) -> bool {
        matches!(self, PricingError::ConvergenceFailure { .. })
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::UnsupportedExercise(msg) => {
                write!(f, "Unsupported exercise style: {}", msg)
            }
            PricingError::ConvergenceFailure {
                estimate,
                iterations,
            } => write!(
                f,
                "Failed to converge after {} iterations (last estimate {})",
                iterations, estimate
            ),
            PricingError::NumericalDegeneracy(msg) => {
                write!(f, "Numerical degeneracy: {}", msg)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Iteration budget exhausted
/// - `DerivativeNearZero`: Newton step undefined
/// - `NoBracket`: End points do not bracket a root
/// - `OutOfDomain`: Iterate left the admissible interval
/// - `NumericalInstability`: Non-finite value encountered
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100, last_estimate: 0.25 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations (last estimate {last_estimate})")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
        /// Final iterate
        last_estimate: f64,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// Point at which the derivative vanished
        x: f64,
    },

    /// No sign change between the bracket end points.
    #[error("No root bracketed in [{a}, {b}]")]
    NoBracket {
        /// Lower end point
        a: f64,
        /// Upper end point
        b: f64,
    },

    /// Iterate left the admissible domain.
    #[error("Iterate x = {x} left the solver domain")]
    OutOfDomain {
        /// Offending iterate
        x: f64,
    },

    /// Non-finite value encountered.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::MaxIterationsExceeded {
                iterations,
                last_estimate,
            } => PricingError::ConvergenceFailure {
                estimate: last_estimate,
                iterations,
            },
            SolverError::NoBracket { .. } => PricingError::InvalidInput(err.to_string()),
            SolverError::DerivativeNearZero { .. }
            | SolverError::OutOfDomain { .. }
            | SolverError::NumericalInstability(_) => {
                PricingError::NumericalDegeneracy(err.to_string())
            }
        }
    }
}
