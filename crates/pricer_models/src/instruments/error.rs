//! Instrument error types.
//!
//! Structured errors for option parameter validation. Every variant is
//! a validation failure and converts into `PricingError::InvalidInput`.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidSpot`: Spot price non-positive or non-finite
/// - `InvalidStrike`: Strike price non-positive or non-finite
/// - `InvalidExpiry`: Time to maturity non-positive or non-finite
/// - `InvalidVolatility`: Volatility non-positive or non-finite
/// - `InvalidRate`: Risk-free rate non-finite
/// - `InvalidParameter`: Unparseable option type, exercise style or field name
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid spot price.
    #[error("Invalid spot: S = {spot} (must be positive and finite)")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid strike price.
    #[error("Invalid strike: K = {strike} (must be positive and finite)")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to maturity.
    #[error("Invalid expiry: T = {expiry} (must be positive and finite)")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid volatility.
    #[error("Invalid volatility: σ = {volatility} (must be positive and finite)")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid risk-free rate.
    #[error("Invalid rate: r = {rate} (must be finite)")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_strike_display() {
        let err = InstrumentError::InvalidStrike { strike: -100.0 };
        assert_eq!(
            format!("{}", err),
            "Invalid strike: K = -100 (must be positive and finite)"
        );
    }

    #[test]
    fn test_invalid_volatility_display() {
        let err = InstrumentError::InvalidVolatility { volatility: 0.0 };
        assert!(format!("{}", err).contains("σ = 0"));
    }

    #[test]
    fn test_conversion_to_pricing_error() {
        let err: PricingError = InstrumentError::InvalidExpiry { expiry: 0.0 }.into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Invalid expiry"));

        let err: PricingError = InstrumentError::InvalidParameter {
            message: "unknown option type".to_string(),
        }
        .into();
        assert_eq!(
            err,
            PricingError::InvalidInput("Invalid parameter: unknown option type".to_string())
        );
    }
}
