//! Closed-form Black-Scholes engine.
//!
//! Wraps [`pricer_models::analytical::BlackScholes`] behind the
//! [`PricingEngine`] interface. Greeks are reported in quoted units.

use pricer_core::types::PricingError;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::OptionParams;
use tracing::debug;

use crate::engine::{ModelKind, PricingEngine};
use crate::greeks::{GreeksResult, PricingResult};

/// Black-Scholes pricing engine for European options.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{OptionParams, OptionType};
/// use pricer_pricing::analytical::BlackScholesEngine;
/// use pricer_pricing::engine::PricingEngine;
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let result = BlackScholesEngine::new().price(&params).unwrap();
/// assert!((result.price - 10.4506).abs() < 1e-4);
/// assert!((result.greeks.unwrap().vega.unwrap() - 0.3752).abs() < 1e-4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlackScholesEngine;

impl BlackScholesEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }
}

impl PricingEngine for BlackScholesEngine {
    fn model(&self) -> ModelKind {
        ModelKind::BlackScholes
    }

    fn price(&self, params: &OptionParams) -> Result<PricingResult, PricingError> {
        debug!(model = %self.model(), option_type = %params.option_type(), "pricing");

        let bs = BlackScholes::from_params(params)?;
        let option_type = params.option_type();
        let greeks = GreeksResult::from(bs.greeks(option_type).quoted());

        PricingResult::new(self.model(), bs.price(option_type))
            .with_greeks(greeks)
            .ensure_finite()
    }
}
