//! Vanilla option parameters.
//!
//! [`OptionParams`] is the single validated input shared by every pricing
//! engine. [`QuoteParams`] is the same contract minus volatility, used when
//! the volatility is the unknown (implied volatility inversion).

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;
use super::exercise::ExerciseStyle;
use super::payoff::OptionType;

fn check_positive(
    value: f64,
    err: impl FnOnce(f64) -> InstrumentError,
) -> Result<f64, InstrumentError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(err(value))
    }
}

fn check_spot(spot: f64) -> Result<f64, InstrumentError> {
    check_positive(spot, |spot| InstrumentError::InvalidSpot { spot })
}

fn check_strike(strike: f64) -> Result<f64, InstrumentError> {
    check_positive(strike, |strike| InstrumentError::InvalidStrike { strike })
}

fn check_expiry(expiry: f64) -> Result<f64, InstrumentError> {
    check_positive(expiry, |expiry| InstrumentError::InvalidExpiry { expiry })
}

fn check_volatility(volatility: f64) -> Result<f64, InstrumentError> {
    check_positive(volatility, |volatility| InstrumentError::InvalidVolatility {
        volatility,
    })
}

fn check_rate(rate: f64) -> Result<f64, InstrumentError> {
    if rate.is_finite() {
        Ok(rate)
    } else {
        Err(InstrumentError::InvalidRate { rate })
    }
}

/// Validated parameters of a vanilla option.
///
/// Spot, strike, expiry and volatility are strictly positive and finite;
/// the rate is finite. Values are never clamped: construction either
/// succeeds with exactly the given inputs or fails.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ExerciseStyle, OptionParams, OptionType, ParamField};
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// assert_eq!(params.exercise(), ExerciseStyle::European);
///
/// let bumped = params.with_field(ParamField::Spot, 105.0).unwrap();
/// assert_eq!(bumped.spot(), 105.0);
/// assert_eq!(params.spot(), 100.0);
///
/// assert!(OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.0, OptionType::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionParams {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
    exercise: ExerciseStyle,
}

impl OptionParams {
    /// Creates European option parameters with validation.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price (must be positive)
    /// * `strike` - Strike price (must be positive)
    /// * `expiry` - Time to maturity in years (must be positive)
    /// * `rate` - Continuously compounded risk-free rate (must be finite)
    /// * `volatility` - Annualised volatility (must be positive)
    /// * `option_type` - Call or put
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        Ok(Self {
            spot: check_spot(spot)?,
            strike: check_strike(strike)?,
            expiry: check_expiry(expiry)?,
            rate: check_rate(rate)?,
            volatility: check_volatility(volatility)?,
            option_type,
            exercise: ExerciseStyle::European,
        })
    }

    /// Returns a copy with the given exercise style.
    #[inline]
    pub fn with_exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.exercise = exercise;
        self
    }

    /// Returns a copy with the given option type.
    #[inline]
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Returns a validated copy with one numeric input replaced.
    pub fn with_field(&self, field: ParamField, value: f64) -> Result<Self, InstrumentError> {
        let mut next = *self;
        match field {
            ParamField::Spot => next.spot = check_spot(value)?,
            ParamField::Strike => next.strike = check_strike(value)?,
            ParamField::Expiry => next.expiry = check_expiry(value)?,
            ParamField::Rate => next.rate = check_rate(value)?,
            ParamField::Volatility => next.volatility = check_volatility(value)?,
        }
        Ok(next)
    }

    /// Reads one numeric input by name.
    pub fn field(&self, field: ParamField) -> f64 {
        match field {
            ParamField::Spot => self.spot,
            ParamField::Strike => self.strike,
            ParamField::Expiry => self.expiry,
            ParamField::Rate => self.rate,
            ParamField::Volatility => self.volatility,
        }
    }

    /// Drops the volatility, keeping everything else.
    pub fn quote(&self) -> QuoteParams {
        QuoteParams {
            spot: self.spot,
            strike: self.strike,
            expiry: self.expiry,
            rate: self.rate,
            option_type: self.option_type,
            exercise: self.exercise,
        }
    }

    /// Spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Exercise style.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Discount factor to expiry, `e^(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Exercise value at the current spot.
    #[inline]
    pub fn intrinsic(&self) -> f64 {
        self.option_type.intrinsic(self.spot, self.strike)
    }
}

/// Option parameters without volatility.
///
/// Input to implied volatility inversion, where the volatility is the
/// quantity being solved for.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionType, QuoteParams};
///
/// let quote = QuoteParams::new(100.0, 100.0, 1.0, 0.05, OptionType::Put).unwrap();
/// let params = quote.with_volatility(0.25).unwrap();
/// assert_eq!(params.volatility(), 0.25);
/// assert_eq!(params.quote(), quote);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuoteParams {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    option_type: OptionType,
    exercise: ExerciseStyle,
}

impl QuoteParams {
    /// Creates European quote parameters with validation.
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        option_type: OptionType,
    ) -> Result<Self, InstrumentError> {
        Ok(Self {
            spot: check_spot(spot)?,
            strike: check_strike(strike)?,
            expiry: check_expiry(expiry)?,
            rate: check_rate(rate)?,
            option_type,
            exercise: ExerciseStyle::European,
        })
    }

    /// Returns a copy with the given exercise style.
    #[inline]
    pub fn with_exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.exercise = exercise;
        self
    }

    /// Completes the parameters with a volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<OptionParams, InstrumentError> {
        Ok(OptionParams {
            spot: self.spot,
            strike: self.strike,
            expiry: self.expiry,
            rate: self.rate,
            volatility: check_volatility(volatility)?,
            option_type: self.option_type,
            exercise: self.exercise,
        })
    }

    /// Spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Exercise style.
    #[inline]
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Discount factor to expiry, `e^(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Model-free price bounds `(lower, upper)` for a European option.
    ///
    /// Call: `(max(S - K·e^(-rT), 0), S)`. Put: `(max(K·e^(-rT) - S, 0), K·e^(-rT))`.
    pub fn arbitrage_bounds(&self) -> (f64, f64) {
        let pv_strike = self.strike * self.discount_factor();
        match self.option_type {
            OptionType::Call => ((self.spot - pv_strike).max(0.0), self.spot),
            OptionType::Put => ((pv_strike - self.spot).max(0.0), pv_strike),
        }
    }
}

/// Numeric input of [`OptionParams`] that can be varied independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ParamField {
    /// Underlying spot price
    Spot,
    /// Strike price
    Strike,
    /// Time to maturity
    Expiry,
    /// Risk-free rate
    Rate,
    /// Volatility
    Volatility,
}

impl ParamField {
    /// All fields in declaration order.
    pub const ALL: [ParamField; 5] = [
        ParamField::Spot,
        ParamField::Strike,
        ParamField::Expiry,
        ParamField::Rate,
        ParamField::Volatility,
    ];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamField::Spot => "spot",
            ParamField::Strike => "strike",
            ParamField::Expiry => "expiry",
            ParamField::Rate => "rate",
            ParamField::Volatility => "volatility",
        }
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamField {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spot" | "s" => Ok(ParamField::Spot),
            "strike" | "k" => Ok(ParamField::Strike),
            "expiry" | "time" | "t" => Ok(ParamField::Expiry),
            "rate" | "r" => Ok(ParamField::Rate),
            "volatility" | "vol" | "sigma" => Ok(ParamField::Volatility),
            other => Err(InstrumentError::InvalidParameter {
                message: format!("unknown parameter field '{}'", other),
            }),
        }
    }
}
