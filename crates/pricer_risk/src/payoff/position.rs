//! Multi-leg option positions.

use std::fmt;

use pricer_core::types::PricingError;
use pricer_models::instruments::OptionType;
use thiserror::Error;

/// Position validation errors.
///
/// # Variants
/// - `EmptyPosition`: No legs
/// - `InvalidLeg`: A leg field is out of range
/// - `InvalidSpot`: A diagram spot is negative or non-finite
/// - `InvalidRange`: Spot range bounds or point count are unusable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    /// Position has no legs.
    #[error("Position must contain at least one leg")]
    EmptyPosition,

    /// Leg field out of range.
    #[error("Invalid leg {index}: {field} = {value} ({reason})")]
    InvalidLeg {
        /// Zero-based leg index
        index: usize,
        /// Offending field
        field: &'static str,
        /// Offending value
        value: f64,
        /// Constraint that failed
        reason: &'static str,
    },

    /// Diagram spot out of range.
    #[error("Invalid spot {spot} (must be finite and non-negative)")]
    InvalidSpot {
        /// Offending spot
        spot: f64,
    },

    /// Unusable spot range.
    #[error("Invalid spot range: {message}")]
    InvalidRange {
        /// Description of the problem
        message: String,
    },
}

impl From<PositionError> for PricingError {
    fn from(err: PositionError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// Direction of a leg.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Bought: pays premium, receives intrinsic value.
    #[default]
    Long,
    /// Sold: receives premium, pays intrinsic value.
    Short,
}

impl Side {
    /// `+1` for long, `-1` for short.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Side::Long => 1.0,
            Side::Short => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

/// One option in a position, valued at expiry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionLeg {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: f64,
    /// Premium per unit paid (long) or received (short).
    pub premium: f64,
    /// Number of units.
    pub quantity: f64,
    /// Long or short.
    #[cfg_attr(feature = "serde", serde(default))]
    pub side: Side,
}

impl OptionLeg {
    /// Long leg of one unit.
    pub fn long(option_type: OptionType, strike: f64, premium: f64) -> Self {
        Self {
            option_type,
            strike,
            premium,
            quantity: 1.0,
            side: Side::Long,
        }
    }

    /// Short leg of one unit.
    pub fn short(option_type: OptionType, strike: f64, premium: f64) -> Self {
        Self {
            side: Side::Short,
            ..Self::long(option_type, strike, premium)
        }
    }

    /// Returns a copy with a different quantity.
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Signed value at expiry, excluding premium.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.side.sign() * self.quantity * self.option_type.intrinsic(spot, self.strike)
    }

    /// Signed profit at expiry, net of premium.
    #[inline]
    pub fn profit_loss(&self, spot: f64) -> f64 {
        self.side.sign()
            * self.quantity
            * (self.option_type.intrinsic(spot, self.strike) - self.premium)
    }

    fn validate(&self, index: usize) -> Result<(), PositionError> {
        let invalid = |field, value, reason| PositionError::InvalidLeg {
            index,
            field,
            value,
            reason,
        };
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(invalid("strike", self.strike, "must be positive and finite"));
        }
        if !(self.premium.is_finite() && self.premium >= 0.0) {
            return Err(invalid("premium", self.premium, "must be non-negative and finite"));
        }
        if !(self.quantity.is_finite() && self.quantity > 0.0) {
            return Err(invalid("quantity", self.quantity, "must be positive and finite"));
        }
        Ok(())
    }
}

/// A validated, non-empty set of option legs.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::OptionType;
/// use pricer_risk::payoff::{OptionLeg, Position};
///
/// let straddle = Position::new(vec![
///     OptionLeg::long(OptionType::Call, 100.0, 5.0),
///     OptionLeg::long(OptionType::Put, 100.0, 4.0),
/// ])
/// .unwrap();
/// assert_eq!(straddle.legs().len(), 2);
///
/// assert!(Position::new(vec![]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PositionSpec"))]
pub struct Position {
    legs: Vec<OptionLeg>,
}

impl Position {
    /// Creates a position, validating every leg.
    pub fn new(legs: Vec<OptionLeg>) -> Result<Self, PositionError> {
        if legs.is_empty() {
            return Err(PositionError::EmptyPosition);
        }
        for (index, leg) in legs.iter().enumerate() {
            leg.validate(index)?;
        }
        Ok(Self { legs })
    }

    /// Legs in input order.
    #[inline]
    pub fn legs(&self) -> &[OptionLeg] {
        &self.legs
    }

    /// Net premium paid; negative when the position is a net credit.
    pub fn net_premium(&self) -> f64 {
        self.legs
            .iter()
            .map(|leg| leg.side.sign() * leg.quantity * leg.premium)
            .sum()
    }

    /// Lowest and highest strike.
    pub fn strike_bounds(&self) -> (f64, f64) {
        self.legs.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), leg| {
            (lo.min(leg.strike), hi.max(leg.strike))
        })
    }
}

/// Unvalidated wire form; deserialisation goes through [`Position::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PositionSpec {
    legs: Vec<OptionLeg>,
}

#[cfg(feature = "serde")]
impl TryFrom<PositionSpec> for Position {
    type Error = PositionError;

    fn try_from(spec: PositionSpec) -> Result<Self, Self::Error> {
        Position::new(spec.legs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_short_leg_earns_premium_when_worthless() {
        let leg = OptionLeg::short(OptionType::Call, 100.0, 3.0);
        assert_relative_eq!(leg.profit_loss(90.0), 3.0);
        assert_relative_eq!(leg.profit_loss(110.0), -7.0);
        assert_relative_eq!(leg.payoff(110.0), -10.0);
    }

    #[test]
    fn test_quantity_scales_leg() {
        let leg = OptionLeg::long(OptionType::Put, 100.0, 2.0).with_quantity(3.0);
        assert_relative_eq!(leg.profit_loss(90.0), 24.0);
        assert_relative_eq!(leg.profit_loss(120.0), -6.0);
    }

    #[test]
    fn test_validation_names_the_leg() {
        let err = Position::new(vec![
            OptionLeg::long(OptionType::Call, 100.0, 1.0),
            OptionLeg::long(OptionType::Call, 100.0, -1.0),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            PositionError::InvalidLeg {
                index: 1,
                field: "premium",
                ..
            }
        ));

        let zero_qty = OptionLeg::long(OptionType::Put, 90.0, 1.0).with_quantity(0.0);
        assert!(Position::new(vec![zero_qty]).is_err());
        assert!(Position::new(vec![OptionLeg::long(OptionType::Put, 0.0, 1.0)]).is_err());
        assert!(Position::new(vec![OptionLeg::long(OptionType::Put, f64::NAN, 1.0)]).is_err());
    }

    #[test]
    fn test_net_premium_and_bounds() {
        let spread = Position::new(vec![
            OptionLeg::long(OptionType::Call, 95.0, 7.0),
            OptionLeg::short(OptionType::Call, 105.0, 2.5),
        ])
        .unwrap();
        assert_relative_eq!(spread.net_premium(), 4.5);
        assert_eq!(spread.strike_bounds(), (95.0, 105.0));
    }

    #[test]
    fn test_error_converts_to_validation() {
        let err: PricingError = PositionError::EmptyPosition.into();
        assert!(err.is_validation());
    }
}
