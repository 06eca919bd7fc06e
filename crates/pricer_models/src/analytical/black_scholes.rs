//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Greek conventions
//!
//! [`BlackScholes::greeks`] returns raw partial derivatives (vega per unit
//! of σ, theta per year, rho per unit of r). [`Greeks::quoted`] converts to
//! the market-quoted form: vega and rho per 1%, theta per calendar day.

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::{ExerciseStyle, OptionParams, OptionType};

/// Calendar days per year used to quote theta.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Divisor turning a per-unit sensitivity into a per-1% sensitivity.
pub const PER_PERCENT: f64 = 100.0;

/// Smallest σ√T for which the closed form is evaluated.
pub const MIN_VOL_SQRT_T: f64 = 1e-8;

/// Smallest accepted expiry and volatility.
const MIN_INPUT: f64 = 1e-10;

#[inline]
fn lit<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

#[inline]
fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Full set of option sensitivities.
///
/// Whether the values are raw or quoted depends on where they came from;
/// see the module documentation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T: Float> {
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂σ
    pub vega: T,
    /// ∂V/∂t (time decay, usually negative)
    pub theta: T,
    /// ∂V/∂r
    pub rho: T,
}

impl<T: Float> Greeks<T> {
    /// Converts raw Greeks into quoted units.
    ///
    /// Vega and rho are divided by 100, theta by 365.
    pub fn quoted(&self) -> Self {
        let pct = lit::<T>(PER_PERCENT);
        Self {
            delta: self.delta,
            gamma: self.gamma,
            vega: self.vega / pct,
            theta: self.theta / lit::<T>(DAYS_PER_YEAR),
            rho: self.rho / pct,
        }
    }

    /// Returns true when every Greek is finite.
    pub fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.vega.is_finite()
            && self.theta.is_finite()
            && self.rho.is_finite()
    }
}

/// Black-Scholes model for a single European option contract.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call();
/// let put_price = bs.price_put();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    spot: T,
    strike: T,
    expiry: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `InvalidSpot`, `InvalidStrike` for non-positive prices
    /// - `InvalidExpiry`, `InvalidVolatility` for non-positive or vanishing inputs
    /// - `DegenerateVariance` if σ√T is below [`MIN_VOL_SQRT_T`]
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 100.0, 1.0, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 100.0, 1.0, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 100.0, 1.0, 0.05, 0.0).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 100.0, 1e-12, 0.05, 0.2).is_err());
    /// ```
    pub fn new(
        spot: T,
        strike: T,
        expiry: T,
        rate: T,
        volatility: T,
    ) -> Result<Self, AnalyticalError> {
        let min_input = lit::<T>(MIN_INPUT);

        if !(spot.is_finite() && spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot { spot: as_f64(spot) });
        }
        if !(strike.is_finite() && strike > T::zero()) {
            return Err(AnalyticalError::InvalidStrike {
                strike: as_f64(strike),
            });
        }
        if !(expiry.is_finite() && expiry >= min_input) {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: as_f64(expiry),
            });
        }
        if !(volatility.is_finite() && volatility >= min_input) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: as_f64(volatility),
            });
        }
        if !rate.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("non-finite rate {}", as_f64(rate)),
            });
        }

        let vol_sqrt_t = volatility * expiry.sqrt();
        if vol_sqrt_t < lit::<T>(MIN_VOL_SQRT_T) {
            return Err(AnalyticalError::DegenerateVariance {
                vol_sqrt_t: as_f64(vol_sqrt_t),
            });
        }

        Ok(Self {
            spot,
            strike,
            expiry,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the time to expiry.
    #[inline]
    pub fn expiry(&self) -> T {
        self.expiry
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    #[inline]
    fn vol_sqrt_t(&self) -> T {
        self.volatility * self.expiry.sqrt()
    }

    #[inline]
    fn discount(&self) -> T {
        (-self.rate * self.expiry).exp()
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self) -> T {
        let half = lit::<T>(0.5);
        let log_moneyness = (self.spot / self.strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * self.expiry;
        (log_moneyness + drift) / self.vol_sqrt_t()
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self) -> T {
        self.d1() - self.vol_sqrt_t()
    }

    /// European call price, C = S·N(d₁) - K·e^(-rT)·N(d₂).
    #[inline]
    pub fn price_call(&self) -> T {
        self.spot * norm_cdf(self.d1()) - self.strike * self.discount() * norm_cdf(self.d2())
    }

    /// European put price, P = K·e^(-rT)·N(-d₂) - S·N(-d₁).
    #[inline]
    pub fn price_put(&self) -> T {
        self.strike * self.discount() * norm_cdf(-self.d2()) - self.spot * norm_cdf(-self.d1())
    }

    /// Price for the given option type.
    #[inline]
    pub fn price(&self, option_type: OptionType) -> T {
        match option_type {
            OptionType::Call => self.price_call(),
            OptionType::Put => self.price_put(),
        }
    }

    /// Delta: N(d₁) for a call, N(d₁) - 1 for a put.
    #[inline]
    pub fn delta(&self, option_type: OptionType) -> T {
        let n_d1 = norm_cdf(self.d1());
        match option_type {
            OptionType::Call => n_d1,
            OptionType::Put => n_d1 - T::one(),
        }
    }

    /// Gamma: φ(d₁) / (S·σ·√T), identical for calls and puts.
    #[inline]
    pub fn gamma(&self) -> T {
        norm_pdf(self.d1()) / (self.spot * self.vol_sqrt_t())
    }

    /// Raw vega: S·√T·φ(d₁) per unit of volatility.
    #[inline]
    pub fn vega(&self) -> T {
        self.spot * self.expiry.sqrt() * norm_pdf(self.d1())
    }

    /// Raw theta per year.
    ///
    /// - Call: -(S·σ·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂)
    /// - Put: -(S·σ·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂)
    #[inline]
    pub fn theta(&self, option_type: OptionType) -> T {
        let two = lit::<T>(2.0);
        let decay =
            -(self.spot * self.volatility * norm_pdf(self.d1())) / (two * self.expiry.sqrt());
        let carry = self.rate * self.strike * self.discount();
        match option_type {
            OptionType::Call => decay - carry * norm_cdf(self.d2()),
            OptionType::Put => decay + carry * norm_cdf(-self.d2()),
        }
    }

    /// Raw rho per unit of rate.
    ///
    /// - Call: K·T·e^(-rT)·N(d₂)
    /// - Put: -K·T·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, option_type: OptionType) -> T {
        let scale = self.strike * self.expiry * self.discount();
        match option_type {
            OptionType::Call => scale * norm_cdf(self.d2()),
            OptionType::Put => -scale * norm_cdf(-self.d2()),
        }
    }

    /// All raw Greeks for the given option type.
    pub fn greeks(&self, option_type: OptionType) -> Greeks<T> {
        Greeks {
            delta: self.delta(option_type),
            gamma: self.gamma(),
            vega: self.vega(),
            theta: self.theta(option_type),
            rho: self.rho(option_type),
        }
    }
}

impl BlackScholes<f64> {
    /// Builds the model from validated option parameters.
    ///
    /// # Errors
    /// - `UnsupportedExerciseStyle` for American exercise
    /// - `DegenerateVariance` if σ√T is effectively zero
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::{ExerciseStyle, OptionParams, OptionType};
    ///
    /// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
    /// let price = BlackScholes::from_params(&params).unwrap().price(params.option_type());
    /// assert!((price - 10.4506).abs() < 1e-4);
    ///
    /// let american = params.with_exercise(ExerciseStyle::American);
    /// assert!(BlackScholes::from_params(&american).is_err());
    /// ```
    pub fn from_params(params: &OptionParams) -> Result<Self, AnalyticalError> {
        if params.exercise() != ExerciseStyle::European {
            return Err(AnalyticalError::UnsupportedExerciseStyle {
                style: format!(
                    "{} exercise has no closed-form Black-Scholes price",
                    params.exercise()
                ),
            });
        }
        Self::new(
            params.spot(),
            params.strike(),
            params.expiry(),
            params.rate(),
            params.volatility(),
        )
    }
}
