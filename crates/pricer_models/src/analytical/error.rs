//! Error types for analytical pricing operations.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidSpot` / `InvalidStrike` / `InvalidExpiry` / `InvalidVolatility`:
///   a non-positive or non-finite input
/// - `DegenerateVariance`: σ√T too small for the closed form to be evaluated
/// - `UnsupportedExerciseStyle`: exercise style not supported by the formula
/// - `NumericalInstability`: computation produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike price.
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to maturity.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Total standard deviation σ√T is effectively zero.
    #[error("Degenerate variance: σ√T = {vol_sqrt_t} is too close to zero")]
    DegenerateVariance {
        /// The offending σ√T
        vol_sqrt_t: f64,
    },

    /// Unsupported exercise style.
    #[error("Unsupported exercise style: {style}")]
    UnsupportedExerciseStyle {
        /// Description of the unsupported exercise style
        style: String,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::UnsupportedExerciseStyle { .. } => {
                PricingError::UnsupportedExercise(err.to_string())
            }
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalDegeneracy(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================
    // Display
    // ==========================================================

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_unsupported_exercise_style_display() {
        let err = AnalyticalError::UnsupportedExerciseStyle {
            style: "american".to_string(),
        };
        assert_eq!(format!("{}", err), "Unsupported exercise style: american");
    }

    // ==========================================================
    // From<AnalyticalError> for PricingError
    // ==========================================================

    #[test]
    fn test_input_errors_are_validation() {
        let cases = [
            AnalyticalError::InvalidSpot { spot: -50.0 },
            AnalyticalError::InvalidStrike { strike: 0.0 },
            AnalyticalError::InvalidExpiry { expiry: 0.0 },
            AnalyticalError::InvalidVolatility { volatility: 0.0 },
            AnalyticalError::DegenerateVariance { vol_sqrt_t: 1e-12 },
        ];
        for err in cases {
            let pricing_err: PricingError = err.into();
            assert!(matches!(pricing_err, PricingError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_unsupported_exercise_to_pricing_error() {
        let err = AnalyticalError::UnsupportedExerciseStyle {
            style: "american".to_string(),
        };
        match PricingError::from(err) {
            PricingError::UnsupportedExercise(msg) => assert!(msg.contains("american")),
            other => panic!("Expected UnsupportedExercise variant, got {:?}", other),
        }
    }

    #[test]
    fn test_numerical_instability_to_pricing_error() {
        let err = AnalyticalError::NumericalInstability {
            message: "Overflow".to_string(),
        };
        let pricing_err: PricingError = err.into();
        assert!(matches!(pricing_err, PricingError::NumericalDegeneracy(_)));
        assert!(!pricing_err.is_validation());
    }
}
