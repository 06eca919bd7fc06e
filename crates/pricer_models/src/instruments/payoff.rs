//! Vanilla call/put payoffs.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use super::error::InstrumentError;

/// Type of vanilla option.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// assert_eq!(OptionType::Call.intrinsic(110.0_f64, 100.0), 10.0);
/// assert_eq!(OptionType::Put.intrinsic(110.0_f64, 100.0), 0.0);
/// assert_eq!("put".parse::<OptionType>().unwrap(), OptionType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionType {
    /// Exercise value at spot `spot` for strike `strike`.
    ///
    /// Exact (non-smoothed) hockey-stick payoff, never negative.
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        let zero = T::zero();
        match self {
            OptionType::Call => (spot - strike).max(zero),
            OptionType::Put => (strike - spot).max(zero),
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(InstrumentError::InvalidParameter {
                message: format!("unsupported option type '{}': expected call or put", other),
            }),
        }
    }
}
