//! Cox-Ross-Rubinstein binomial pricing.
//!
//! Backward induction rolls a single `steps + 1` buffer in place, so memory
//! is O(steps) and time is O(steps²). Delta, gamma and theta are read off
//! the first two layers of the same induction.

use pricer_core::types::PricingError;
use pricer_models::analytical::DAYS_PER_YEAR;
use pricer_models::instruments::{OptionParams, OptionType};
use tracing::debug;

use super::config::{LatticeConfig, MAX_SNAPSHOT_STEPS};
use super::tree::BinomialTree;
use crate::engine::{ModelKind, PricingEngine};
use crate::error::ConfigError;
use crate::greeks::{GreeksResult, PricingResult};

/// Per-step CRR factors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CrrLattice {
    pub(crate) spot: f64,
    pub(crate) strike: f64,
    pub(crate) option_type: OptionType,
    pub(crate) american: bool,
    pub(crate) steps: usize,
    pub(crate) dt: f64,
    pub(crate) up: f64,
    pub(crate) down: f64,
    pub(crate) probability: f64,
    pub(crate) discount: f64,
}

impl CrrLattice {
    /// Derives the lattice for `params` split into `steps` periods.
    ///
    /// # Errors
    /// `NumericalDegeneracy` if the risk-neutral probability is outside
    /// `[0, 1]` or any factor is non-finite.
    pub(crate) fn new(params: &OptionParams, steps: usize) -> Result<Self, PricingError> {
        let dt = params.expiry() / steps as f64;
        let up = (params.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = (params.rate() * dt).exp();
        let probability = (growth - down) / (up - down);
        let discount = 1.0 / growth;

        if !(0.0..=1.0).contains(&probability) || !discount.is_finite() {
            return Err(PricingError::NumericalDegeneracy(format!(
                "binomial up-probability {} is outside [0, 1] with {} steps; \
                 increase the step count",
                probability, steps
            )));
        }

        Ok(Self {
            spot: params.spot(),
            strike: params.strike(),
            option_type: params.option_type(),
            american: params.exercise().is_american(),
            steps,
            dt,
            up,
            down,
            probability,
            discount,
        })
    }

    /// Spot at node 0 of `level`, `S·d^level`.
    #[inline]
    pub(crate) fn lowest_spot(&self, level: usize) -> f64 {
        self.spot * self.down.powi(level as i32)
    }

    /// Ratio between neighbouring spots on one level, `u²`.
    #[inline]
    pub(crate) fn node_ratio(&self) -> f64 {
        self.up * self.up
    }

    #[inline]
    pub(crate) fn intrinsic(&self, spot: f64) -> f64 {
        self.option_type.intrinsic(spot, self.strike)
    }

    /// Discounted expectation of the two successor values.
    #[inline]
    pub(crate) fn continuation(&self, down_value: f64, up_value: f64) -> f64 {
        self.discount * (self.probability * up_value + (1.0 - self.probability) * down_value)
    }

    /// Payoffs at the `steps + 1` terminal nodes.
    pub(crate) fn terminal_values(&self) -> Vec<f64> {
        let ratio = self.node_ratio();
        let mut spot = self.lowest_spot(self.steps);
        (0..=self.steps)
            .map(|_| {
                let value = self.intrinsic(spot);
                spot *= ratio;
                value
            })
            .collect()
    }
}

/// Values captured on the way back to the root.
#[derive(Default)]
struct Layers {
    first: Option<[f64; 2]>,
    second: Option<[f64; 3]>,
}

impl Layers {
    fn capture(&mut self, level: usize, values: &[f64]) {
        match level {
            1 => self.first = Some([values[0], values[1]]),
            2 => self.second = Some([values[0], values[1], values[2]]),
            _ => {}
        }
    }
}

/// Binomial lattice pricing engine.
///
/// Prices European and American options. Vega and rho are not estimated.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{ExerciseStyle, OptionParams, OptionType};
/// use pricer_pricing::engine::PricingEngine;
/// use pricer_pricing::lattice::{BinomialTreeEngine, LatticeConfig};
///
/// let engine = BinomialTreeEngine::new(LatticeConfig::with_steps(200).unwrap()).unwrap();
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put)
///     .unwrap()
///     .with_exercise(ExerciseStyle::American);
///
/// let american = engine.price(&params).unwrap();
/// let european = engine
///     .price(&params.with_exercise(ExerciseStyle::European))
///     .unwrap();
/// assert!(american.price >= european.price);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinomialTreeEngine {
    config: LatticeConfig,
}

impl BinomialTreeEngine {
    /// Creates an engine from a configuration.
    ///
    /// # Errors
    /// `InvalidInput` if the configuration is out of bounds.
    pub fn new(config: LatticeConfig) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Engine configuration.
    #[inline]
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Prices with an explicit step count.
    ///
    /// # Errors
    /// - `InvalidInput` if `steps` is outside `[1, max_steps]`
    /// - `NumericalDegeneracy` if the lattice admits arbitrage
    pub fn price_with_steps(
        &self,
        params: &OptionParams,
        steps: usize,
    ) -> Result<PricingResult, PricingError> {
        let steps = self.config.check_steps(steps)?;
        debug!(
            model = %self.model(),
            steps,
            exercise = %params.exercise(),
            "pricing"
        );

        let lattice = CrrLattice::new(params, steps)?;
        let ratio = lattice.node_ratio();
        let mut values = lattice.terminal_values();
        let mut layers = Layers::default();
        layers.capture(steps, &values);

        for level in (0..steps).rev() {
            let mut spot = lattice.lowest_spot(level);
            for node in 0..=level {
                let continuation = lattice.continuation(values[node], values[node + 1]);
                values[node] = if lattice.american {
                    continuation.max(lattice.intrinsic(spot))
                } else {
                    continuation
                };
                spot *= ratio;
            }
            layers.capture(level, &values);
        }

        let price = values[0];
        let greeks = tree_greeks(&lattice, price, &layers);

        PricingResult::new(self.model(), price)
            .with_greeks(greeks)
            .ensure_finite()
    }

    /// Builds the full lattice for inspection.
    ///
    /// # Errors
    /// - `InvalidInput` if `steps` is outside `[1, min(max_steps, 500)]`
    /// - `NumericalDegeneracy` if the lattice admits arbitrage
    pub fn build_tree(
        &self,
        params: &OptionParams,
        steps: usize,
    ) -> Result<BinomialTree, PricingError> {
        let max = self.config.max_steps().min(MAX_SNAPSHOT_STEPS);
        if steps == 0 || steps > max {
            return Err(ConfigError::InvalidStepCount { count: steps, max }.into());
        }
        debug!(model = %self.model(), steps, "building lattice snapshot");

        let lattice = CrrLattice::new(params, steps)?;
        Ok(BinomialTree::build(&lattice))
    }
}

/// Delta, gamma and theta from the first two induction layers.
fn tree_greeks(lattice: &CrrLattice, price: f64, layers: &Layers) -> GreeksResult {
    let s = lattice.spot;
    let delta = layers
        .first
        .map(|[down, up]| (up - down) / (s * lattice.up - s * lattice.down));

    let (gamma, theta) = match layers.second {
        Some([v_dd, v_ud, v_uu]) => {
            let s_uu = s * lattice.up * lattice.up;
            let s_dd = s * lattice.down * lattice.down;
            let upper = (v_uu - v_ud) / (s_uu - s);
            let lower = (v_ud - v_dd) / (s - s_dd);
            let gamma = (upper - lower) / ((s_uu - s_dd) / 2.0);
            let theta = (v_ud - price) / (2.0 * lattice.dt) / DAYS_PER_YEAR;
            (Some(gamma), Some(theta))
        }
        None => (None, None),
    };

    GreeksResult {
        delta,
        gamma,
        vega: None,
        theta,
        rho: None,
    }
}

impl PricingEngine for BinomialTreeEngine {
    fn model(&self) -> ModelKind {
        ModelKind::BinomialTree
    }

    fn price(&self, params: &OptionParams) -> Result<PricingResult, PricingError> {
        self.price_with_steps(params, self.config.steps())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::BlackScholes;
    use pricer_models::instruments::ExerciseStyle;

    fn params(option_type: OptionType) -> OptionParams {
        OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, option_type).unwrap()
    }

    fn engine() -> BinomialTreeEngine {
        BinomialTreeEngine::default()
    }

    // ========================================
    // Lattice factors
    // ========================================

    #[test]
    fn test_crr_factors() {
        let lattice = CrrLattice::new(&params(OptionType::Call), 100).unwrap();
        assert_relative_eq!(lattice.up * lattice.down, 1.0, epsilon = 1e-14);
        assert!(lattice.probability > 0.0 && lattice.probability < 1.0);
        assert_relative_eq!(lattice.dt, 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_arbitrage_lattice_rejected() {
        // r·Δt dominates σ√Δt with a single step
        let p = OptionParams::new(100.0, 100.0, 1.0, 0.5, 0.01, OptionType::Call).unwrap();
        let err = engine().price_with_steps(&p, 1).unwrap_err();
        assert!(matches!(err, PricingError::NumericalDegeneracy(_)));
    }

    #[test]
    fn test_one_step_price_by_hand() {
        let p = params(OptionType::Call);
        let lattice = CrrLattice::new(&p, 1).unwrap();
        let expected = lattice.discount * lattice.probability * (100.0 * lattice.up - 100.0);
        let result = engine().price_with_steps(&p, 1).unwrap();
        assert_relative_eq!(result.price, expected, epsilon = 1e-12);

        let greeks = result.greeks.unwrap();
        assert!(greeks.delta.is_some());
        assert!(greeks.gamma.is_none());
        assert!(greeks.theta.is_none());
    }

    // ========================================
    // Step bounds
    // ========================================

    #[test]
    fn test_step_bounds() {
        let p = params(OptionType::Call);
        assert!(engine().price_with_steps(&p, 0).unwrap_err().is_validation());
        assert!(engine().price_with_steps(&p, 10_001).unwrap_err().is_validation());

        let capped = BinomialTreeEngine::new(LatticeConfig::new(50, 200).unwrap()).unwrap();
        assert!(capped.price_with_steps(&p, 200).is_ok());
        assert!(capped.price_with_steps(&p, 201).is_err());
    }

    // ========================================
    // Convergence and exercise
    // ========================================

    #[test]
    fn test_converges_to_black_scholes() {
        let p = params(OptionType::Call);
        let bs = BlackScholes::from_params(&p).unwrap().price_call();
        let coarse = engine().price_with_steps(&p, 50).unwrap().price;
        let fine = engine().price_with_steps(&p, 1000).unwrap().price;

        assert!((fine - bs).abs() < 0.01);
        assert!((fine - bs).abs() < (coarse - bs).abs());
    }

    #[test]
    fn test_american_put_premium() {
        let european = params(OptionType::Put);
        let american = european.with_exercise(ExerciseStyle::American);
        let eu = engine().price(&european).unwrap().price;
        let am = engine().price(&american).unwrap().price;
        assert!(am > eu);
        assert!(am >= european.intrinsic());
    }

    #[test]
    fn test_american_call_matches_european() {
        let european = params(OptionType::Call);
        let american = european.with_exercise(ExerciseStyle::American);
        let eu = engine().price(&european).unwrap().price;
        let am = engine().price(&american).unwrap().price;
        assert_relative_eq!(am, eu, epsilon = 1e-10);
    }

    // ========================================
    // Greeks
    // ========================================

    #[test]
    fn test_greeks_near_analytical() {
        let p = params(OptionType::Call);
        let bs = BlackScholes::from_params(&p)
            .unwrap()
            .greeks(OptionType::Call)
            .quoted();
        let greeks = engine().price_with_steps(&p, 500).unwrap().greeks.unwrap();

        assert_relative_eq!(greeks.delta.unwrap(), bs.delta, epsilon = 5e-3);
        assert_relative_eq!(greeks.gamma.unwrap(), bs.gamma, epsilon = 5e-4);
        assert_relative_eq!(greeks.theta.unwrap(), bs.theta, epsilon = 1e-3);
        assert!(greeks.vega.is_none());
        assert!(greeks.rho.is_none());
    }

    #[test]
    fn test_two_step_greeks_present() {
        let greeks = engine()
            .price_with_steps(&params(OptionType::Put), 2)
            .unwrap()
            .greeks
            .unwrap();
        assert!(greeks.delta.unwrap() < 0.0);
        assert!(greeks.gamma.unwrap() >= 0.0);
        assert!(greeks.theta.is_some());
    }
}
