//! Pricing result types.
//!
//! Provides [`PricingResult`], the value every engine returns, and
//! [`GreeksResult`], the subset of sensitivities an engine could estimate.
//! All Greeks held here are in quoted units: vega and rho per 1%, theta per
//! calendar day.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;
use pricer_models::analytical::Greeks;

use crate::engine::ModelKind;

/// Two-sided 95% standard normal critical value.
pub const Z_95: f64 = 1.959_963_984_540_054;

/// Two-sided 99% standard normal critical value.
pub const Z_99: f64 = 2.575_829_303_548_901;

/// Greek type for selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Greek {
    /// Delta: ∂V/∂S (sensitivity to spot price)
    Delta,
    /// Gamma: ∂²V/∂S² (convexity with respect to spot)
    Gamma,
    /// Vega: ∂V/∂σ per 1% volatility
    Vega,
    /// Theta: time decay per calendar day
    Theta,
    /// Rho: ∂V/∂r per 1% rate
    Rho,
}

impl Greek {
    /// All Greeks in reporting order.
    pub const ALL: [Greek; 5] = [
        Greek::Delta,
        Greek::Gamma,
        Greek::Vega,
        Greek::Theta,
        Greek::Rho,
    ];

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Greek::Delta => "delta",
            Greek::Gamma => "gamma",
            Greek::Vega => "vega",
            Greek::Theta => "theta",
            Greek::Rho => "rho",
        }
    }
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Greek {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Greek::ALL
            .into_iter()
            .find(|greek| greek.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PricingError::InvalidInput(format!("unknown Greek '{}'", s)))
    }
}

/// Sensitivities estimated by an engine.
///
/// A field is `None` when the engine does not estimate that Greek
/// (e.g. vega and rho for the binomial lattice).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::{Greek, GreeksResult};
///
/// let greeks = GreeksResult {
///     delta: Some(0.55),
///     gamma: Some(0.02),
///     ..Default::default()
/// };
/// assert_eq!(greeks.get(Greek::Delta), Some(0.55));
/// assert_eq!(greeks.get(Greek::Vega), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksResult {
    /// Delta: ∂V/∂S.
    pub delta: Option<f64>,
    /// Gamma: ∂²V/∂S².
    pub gamma: Option<f64>,
    /// Vega per 1% volatility.
    pub vega: Option<f64>,
    /// Theta per calendar day.
    pub theta: Option<f64>,
    /// Rho per 1% rate.
    pub rho: Option<f64>,
}

impl GreeksResult {
    /// Returns the requested Greek, if estimated.
    #[inline]
    pub fn get(&self, greek: Greek) -> Option<f64> {
        match greek {
            Greek::Delta => self.delta,
            Greek::Gamma => self.gamma,
            Greek::Vega => self.vega,
            Greek::Theta => self.theta,
            Greek::Rho => self.rho,
        }
    }

    /// Returns true when every estimated Greek is finite.
    pub fn is_finite(&self) -> bool {
        Greek::ALL
            .iter()
            .filter_map(|greek| self.get(*greek))
            .all(f64::is_finite)
    }
}

impl From<Greeks<f64>> for GreeksResult {
    fn from(greeks: Greeks<f64>) -> Self {
        Self {
            delta: Some(greeks.delta),
            gamma: Some(greeks.gamma),
            vega: Some(greeks.vega),
            theta: Some(greeks.theta),
            rho: Some(greeks.rho),
        }
    }
}

/// Closed confidence interval around a price estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Symmetric interval `centre ± half_width`.
    #[inline]
    pub fn symmetric(centre: f64, half_width: f64) -> Self {
        Self {
            lower: centre - half_width,
            upper: centre + half_width,
        }
    }

    /// Returns true if `value` lies inside the closed interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Half the interval width.
    #[inline]
    pub fn half_width(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }
}

/// Output of a single pricing call.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::engine::ModelKind;
/// use pricer_pricing::greeks::PricingResult;
///
/// let result = PricingResult::new(ModelKind::MonteCarlo, 10.0).with_std_error(0.1);
/// let ci = result.confidence_interval.unwrap();
/// assert!(ci.contains(10.19) && !ci.contains(10.2));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Engine that produced the result.
    pub model: ModelKind,
    /// Present value.
    pub price: f64,
    /// Estimated sensitivities, if requested and supported.
    pub greeks: Option<GreeksResult>,
    /// 95% confidence interval for sampled estimates.
    pub confidence_interval: Option<ConfidenceInterval>,
    /// Standard error for sampled estimates.
    pub std_error: Option<f64>,
}

impl PricingResult {
    /// Creates a result with only a price.
    pub fn new(model: ModelKind, price: f64) -> Self {
        Self {
            model,
            price,
            greeks: None,
            confidence_interval: None,
            std_error: None,
        }
    }

    /// Attaches Greeks.
    pub fn with_greeks(mut self, greeks: GreeksResult) -> Self {
        self.greeks = Some(greeks);
        self
    }

    /// Attaches a standard error and the matching 95% interval.
    pub fn with_std_error(mut self, std_error: f64) -> Self {
        self.std_error = Some(std_error);
        self.confidence_interval =
            Some(ConfidenceInterval::symmetric(self.price, Z_95 * std_error));
        self
    }

    /// 95% confidence half-width, if the result is sampled.
    #[inline]
    pub fn confidence_95(&self) -> Option<f64> {
        self.std_error.map(|se| Z_95 * se)
    }

    /// 99% confidence half-width, if the result is sampled.
    #[inline]
    pub fn confidence_99(&self) -> Option<f64> {
        self.std_error.map(|se| Z_99 * se)
    }

    /// Rejects results carrying NaN or infinite values.
    ///
    /// # Errors
    /// `PricingError::NumericalDegeneracy` naming the offending field.
    pub fn ensure_finite(self) -> Result<Self, PricingError> {
        let degenerate = |field: &str| {
            Err(PricingError::NumericalDegeneracy(format!(
                "{} produced a non-finite {}",
                self.model, field
            )))
        };
        if !self.price.is_finite() {
            return degenerate("price");
        }
        if self.greeks.is_some_and(|greeks| !greeks.is_finite()) {
            return degenerate("Greek");
        }
        if self.std_error.is_some_and(|se| !se.is_finite()) {
            return degenerate("standard error");
        }
        if self
            .confidence_interval
            .is_some_and(|ci| !(ci.lower.is_finite() && ci.upper.is_finite()))
        {
            return degenerate("confidence interval");
        }
        Ok(self)
    }
}
