//! Implied volatility inversion of the Black-Scholes formula.
//!
//! Newton-Raphson on `f(σ) = BS(σ) - market_price` with raw vega as the
//! derivative, started from the Manaster-Koehler estimate. Any Newton
//! failure (flat vega, an iterate leaving the domain, non-finite values or
//! an exhausted budget) falls back to bisection over the whole domain.
//!
//! A root is accepted only when the price pins σ down: vega at the root must
//! exceed `VEGA_EPSILON` and `|f| / vega` must stay within
//! `VOLATILITY_TOLERANCE`. Far out-of-the-money quotes whose price is below
//! the residual tolerance at every σ are reported as `ConvergenceFailure`.

use pricer_core::math::solvers::{BisectionSolver, NewtonRaphsonSolver, SolverConfig};
use pricer_core::types::{PricingError, SolverError};
use tracing::{debug, trace, warn};

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;
use crate::instruments::QuoteParams;

/// Vega below this is treated as flat and hands over to bisection.
const VEGA_EPSILON: f64 = 1e-8;

/// Largest accepted first-order error `|f| / vega` in the solved volatility.
const VOLATILITY_TOLERANCE: f64 = 1e-4;

/// Fallback starting point when the Manaster-Koehler estimate is unusable.
const DEFAULT_GUESS: f64 = 0.2;

/// Configuration for [`ImpliedVolatilitySolver`].
///
/// # Examples
/// ```
/// use pricer_models::analytical::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::default();
/// assert_eq!(config.solver.tolerance, 1e-6);
/// assert_eq!((config.lower_bound, config.upper_bound), (1e-4, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolConfig {
    /// Residual tolerance and iteration budget shared by both solvers
    pub solver: SolverConfig<f64>,
    /// Smallest volatility searched
    pub lower_bound: f64,
    /// Largest volatility searched
    pub upper_bound: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::implied_volatility(),
            lower_bound: 1e-4,
            upper_bound: 5.0,
        }
    }
}

impl ImpliedVolConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` unless `0 < lower_bound < upper_bound`
    /// (both finite), the tolerance is positive and finite, and the
    /// iteration budget is non-zero.
    pub fn new(
        tolerance: f64,
        max_iterations: usize,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<Self, PricingError> {
        let solver = SolverConfig::try_new(tolerance, max_iterations).ok_or_else(|| {
            PricingError::InvalidInput(format!(
                "implied volatility solver needs tolerance > 0 and max_iterations > 0, \
                 got {} and {}",
                tolerance, max_iterations
            ))
        })?;
        if !(lower_bound.is_finite() && upper_bound.is_finite())
            || lower_bound <= 0.0
            || lower_bound >= upper_bound
        {
            return Err(PricingError::InvalidInput(format!(
                "volatility domain [{}, {}] must satisfy 0 < lower < upper",
                lower_bound, upper_bound
            )));
        }
        Ok(Self {
            solver,
            lower_bound,
            upper_bound,
        })
    }
}

/// Recovers the Black-Scholes volatility implied by an observed price.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{BlackScholes, ImpliedVolatilitySolver};
/// use pricer_models::instruments::{OptionType, QuoteParams};
///
/// let quote = QuoteParams::new(100.0, 110.0, 0.5, 0.03, OptionType::Call).unwrap();
/// let market = BlackScholes::new(100.0, 110.0, 0.5, 0.03, 0.27).unwrap().price_call();
///
/// let vol = ImpliedVolatilitySolver::default().solve(market, &quote, None).unwrap();
/// assert!((vol - 0.27).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImpliedVolatilitySolver {
    config: ImpliedVolConfig,
}

impl ImpliedVolatilitySolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: ImpliedVolConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Manaster-Koehler starting point `√(2·|ln(S/K) + rT| / T)`.
    ///
    /// Falls back to 0.2 below the domain and is clamped into it.
    pub fn initial_guess(&self, quote: &QuoteParams) -> f64 {
        let moneyness = (quote.spot() / quote.strike()).ln() + quote.rate() * quote.expiry();
        let estimate = (2.0 * moneyness.abs() / quote.expiry()).sqrt();
        let estimate = if estimate.is_finite() && estimate >= self.config.lower_bound {
            estimate
        } else {
            DEFAULT_GUESS
        };
        estimate.clamp(self.config.lower_bound, self.config.upper_bound)
    }

    /// Solves for the volatility reproducing `market_price`.
    ///
    /// # Arguments
    /// * `market_price` - Observed option price
    /// * `quote` - Option parameters without volatility
    /// * `initial_guess` - Optional Newton starting point, clamped into the domain
    ///
    /// # Errors
    /// - `InvalidInput` if the price is non-finite or outside the no-arbitrage bounds
    /// - `UnsupportedExercise` for American quotes
    /// - `ConvergenceFailure` if neither Newton nor bisection reaches the tolerance,
    ///   or the price is too insensitive to volatility to determine it
    pub fn solve(
        &self,
        market_price: f64,
        quote: &QuoteParams,
        initial_guess: Option<f64>,
    ) -> Result<f64, PricingError> {
        if quote.exercise().is_american() {
            return Err(AnalyticalError::UnsupportedExerciseStyle {
                style: "implied volatility is defined against European Black-Scholes prices"
                    .to_string(),
            }
            .into());
        }

        let (lower, upper) = quote.arbitrage_bounds();
        if !market_price.is_finite() || market_price <= lower || market_price >= upper {
            return Err(PricingError::InvalidInput(format!(
                "market price {} outside no-arbitrage bounds ({}, {})",
                market_price, lower, upper
            )));
        }

        let (vol_lo, vol_hi) = (self.config.lower_bound, self.config.upper_bound);
        let x0 = match initial_guess {
            Some(guess) if guess.is_finite() => guess.clamp(vol_lo, vol_hi),
            Some(guess) => {
                return Err(PricingError::InvalidInput(format!(
                    "initial volatility guess must be finite, got {}",
                    guess
                )))
            }
            None => self.initial_guess(quote),
        };

        debug!(
            market_price,
            option_type = %quote.option_type(),
            initial_guess = x0,
            "solving implied volatility"
        );

        let model = |sigma: f64| {
            BlackScholes::new(quote.spot(), quote.strike(), quote.expiry(), quote.rate(), sigma)
        };
        let residual = |sigma: f64| {
            model(sigma)
                .map(|bs| bs.price(quote.option_type()) - market_price)
                .unwrap_or(f64::NAN)
        };

        let vega = |sigma: f64| model(sigma).map(|bs| bs.vega()).unwrap_or(f64::NAN);
        let determined = |sigma: f64| {
            let v = vega(sigma);
            v.is_finite()
                && v >= VEGA_EPSILON
                && residual(sigma).abs() / v <= VOLATILITY_TOLERANCE
        };

        let newton =
            NewtonRaphsonSolver::new(self.config.solver).with_derivative_epsilon(VEGA_EPSILON);
        let newton_result = newton.find_root_within(
            |sigma| {
                let f = residual(sigma);
                trace!(sigma, residual = f, "newton iterate");
                f
            },
            vega,
            x0,
            vol_lo,
            vol_hi,
        );

        match newton_result {
            Ok(sigma) if determined(sigma) => return Ok(sigma),
            Ok(sigma) => warn!(
                sigma,
                vega = vega(sigma),
                "newton root not determined by price, falling back to bisection"
            ),
            Err(err) => warn!(error = %err, "newton failed, falling back to bisection"),
        }

        let bisection = BisectionSolver::new(self.config.solver);
        match bisection.find_root(&residual, vol_lo, vol_hi) {
            Ok(sigma) if determined(sigma) => Ok(sigma),
            Ok(sigma) => {
                warn!(sigma, vega = vega(sigma), "price insensitive to volatility");
                Err(PricingError::ConvergenceFailure {
                    estimate: sigma,
                    iterations: self.config.solver.max_iterations,
                })
            }
            Err(SolverError::NoBracket { .. }) => {
                let estimate = if residual(vol_lo).abs() <= residual(vol_hi).abs() {
                    vol_lo
                } else {
                    vol_hi
                };
                Err(PricingError::ConvergenceFailure {
                    estimate,
                    iterations: 0,
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{ExerciseStyle, OptionType};
    use approx::assert_relative_eq;

    fn quote(spot: f64, strike: f64, option_type: OptionType) -> QuoteParams {
        QuoteParams::new(spot, strike, 1.0, 0.05, option_type).unwrap()
    }

    fn price(quote: &QuoteParams, sigma: f64) -> f64 {
        BlackScholes::new(quote.spot(), quote.strike(), quote.expiry(), quote.rate(), sigma)
            .unwrap()
            .price(quote.option_type())
    }

    // ==========================================================
    // Configuration
    // ==========================================================

    #[test]
    fn test_config_validation() {
        assert!(ImpliedVolConfig::new(1e-8, 50, 1e-3, 3.0).is_ok());
        assert!(ImpliedVolConfig::new(0.0, 50, 1e-3, 3.0).is_err());
        assert!(ImpliedVolConfig::new(1e-8, 0, 1e-3, 3.0).is_err());
        assert!(ImpliedVolConfig::new(1e-8, 50, 3.0, 1e-3).is_err());
        assert!(ImpliedVolConfig::new(1e-8, 50, 0.0, 3.0).is_err());
    }

    // ==========================================================
    // Initial guess
    // ==========================================================

    #[test]
    fn test_initial_guess_manaster_koehler() {
        let solver = ImpliedVolatilitySolver::default();
        let q = QuoteParams::new(120.0, 100.0, 1.0, 0.0, OptionType::Call).unwrap();
        let expected = (2.0 * (1.2_f64).ln()).sqrt();
        assert_relative_eq!(solver.initial_guess(&q), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_initial_guess_falls_back_at_the_money_forward() {
        let solver = ImpliedVolatilitySolver::default();
        let q = QuoteParams::new(100.0, 100.0, 1.0, 0.0, OptionType::Call).unwrap();
        assert_eq!(solver.initial_guess(&q), DEFAULT_GUESS);
    }

    #[test]
    fn test_initial_guess_is_clamped() {
        let solver = ImpliedVolatilitySolver::default();
        let q = QuoteParams::new(1000.0, 1.0, 0.01, 0.0, OptionType::Call).unwrap();
        assert_eq!(solver.initial_guess(&q), 5.0);
    }

    // ==========================================================
    // Round trips
    // ==========================================================

    #[test]
    fn test_round_trip_atm_call() {
        let q = quote(100.0, 100.0, OptionType::Call);
        let sigma = ImpliedVolatilitySolver::default()
            .solve(price(&q, 0.2), &q, None)
            .unwrap();
        assert_relative_eq!(sigma, 0.2, epsilon = 1e-4);
    }

    #[test]
    fn test_round_trip_put_with_caller_guess() {
        let q = quote(95.0, 100.0, OptionType::Put);
        let sigma = ImpliedVolatilitySolver::default()
            .solve(price(&q, 0.45), &q, Some(1.0))
            .unwrap();
        assert_relative_eq!(sigma, 0.45, epsilon = 1e-4);
    }

    #[test]
    fn test_deep_otm_uses_bisection_safeguard() {
        // A guess at the top of the domain sits where vega is large but the
        // first Newton step overshoots below the lower bound
        let q = quote(100.0, 160.0, OptionType::Call);
        let target = price(&q, 0.3);
        let sigma = ImpliedVolatilitySolver::default()
            .solve(target, &q, Some(5.0))
            .unwrap();
        assert_relative_eq!(price(&q, sigma), target, epsilon = 1e-4);
        assert!(sigma > 0.0 && sigma <= 5.0);
    }

    #[test]
    fn test_deep_itm_put() {
        let q = quote(60.0, 100.0, OptionType::Put);
        let target = price(&q, 0.35);
        let sigma = ImpliedVolatilitySolver::default()
            .solve(target, &q, None)
            .unwrap();
        assert_relative_eq!(sigma, 0.35, epsilon = 1e-3);
    }

    // ==========================================================
    // Rejections
    // ==========================================================

    #[test]
    fn test_price_below_intrinsic_rejected() {
        let q = quote(120.0, 100.0, OptionType::Call);
        let (lower, _) = q.arbitrage_bounds();
        let err = ImpliedVolatilitySolver::default()
            .solve(lower - 0.5, &q, None)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_price_above_upper_bound_rejected() {
        let q = quote(100.0, 100.0, OptionType::Call);
        let err = ImpliedVolatilitySolver::default()
            .solve(100.0, &q, None)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_non_finite_price_rejected() {
        let q = quote(100.0, 100.0, OptionType::Put);
        assert!(ImpliedVolatilitySolver::default()
            .solve(f64::NAN, &q, None)
            .is_err());
    }

    #[test]
    fn test_american_quote_rejected() {
        let q = quote(100.0, 100.0, OptionType::Put).with_exercise(ExerciseStyle::American);
        let err = ImpliedVolatilitySolver::default()
            .solve(8.0, &q, None)
            .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedExercise(_)));
    }

    #[test]
    fn test_flat_vega_quote_not_solved() {
        // Short-dated far out-of-the-money put: the price sits far below the
        // residual tolerance, so any σ near the guess would pass |f| < tol
        let q = QuoteParams::new(100.0, 70.0, 0.02, 0.05, OptionType::Put).unwrap();
        let target = price(&q, 0.1);
        assert!(target > 0.0);

        let err = ImpliedVolatilitySolver::default()
            .solve(target, &q, None)
            .unwrap_err();
        match err {
            PricingError::ConvergenceFailure { estimate, .. } => {
                assert!((1e-4..=5.0).contains(&estimate))
            }
            other => panic!("Expected ConvergenceFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_low_vega_quote_never_returns_wrong_volatility() {
        let q = QuoteParams::new(100.0, 50.0, 0.5, 0.05, OptionType::Put).unwrap();
        let target = price(&q, 0.05);
        match ImpliedVolatilitySolver::default().solve(target, &q, None) {
            Ok(sigma) => assert_relative_eq!(sigma, 0.05, epsilon = 1e-4),
            Err(err) => assert!(err.is_convergence()),
        }
    }

    #[test]
    fn test_price_requiring_vol_above_domain() {
        // Inside the arbitrage bounds but needs σ > 1.0
        let config = ImpliedVolConfig::new(1e-6, 100, 1e-4, 1.0).unwrap();
        let q = quote(100.0, 100.0, OptionType::Call);
        let target = price(&q, 2.0);
        let err = ImpliedVolatilitySolver::new(config)
            .solve(target, &q, None)
            .unwrap_err();
        match err {
            PricingError::ConvergenceFailure { estimate, .. } => assert_eq!(estimate, 1.0),
            other => panic!("Expected ConvergenceFailure, got {:?}", other),
        }
    }
}
