//! Shared pricing interface.
//!
//! Every engine implements [`PricingEngine`]. [`PricingModel`] wraps the
//! three concrete engines in an enum so callers can hold a heterogeneous
//! set of engines with static dispatch.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;
use pricer_models::instruments::OptionParams;

use crate::analytical::BlackScholesEngine;
use crate::greeks::PricingResult;
use crate::lattice::BinomialTreeEngine;
use crate::mc::MonteCarloEngine;

/// Identifies a pricing model.
///
/// Ordered so it can key a deterministic map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModelKind {
    /// Closed-form Black-Scholes
    BlackScholes,
    /// Cox-Ross-Rubinstein binomial lattice
    BinomialTree,
    /// Monte Carlo simulation under GBM
    MonteCarlo,
}

impl ModelKind {
    /// All models in reporting order.
    pub const ALL: [ModelKind; 3] = [
        ModelKind::BlackScholes,
        ModelKind::BinomialTree,
        ModelKind::MonteCarlo,
    ];

    /// Stable snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::BlackScholes => "black_scholes",
            ModelKind::BinomialTree => "binomial_tree",
            ModelKind::MonteCarlo => "monte_carlo",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "black_scholes" | "bs" => Ok(ModelKind::BlackScholes),
            "binomial_tree" | "binomial" | "crr" => Ok(ModelKind::BinomialTree),
            "monte_carlo" | "mc" => Ok(ModelKind::MonteCarlo),
            other => Err(PricingError::InvalidInput(format!(
                "unknown model '{}': expected black_scholes, binomial_tree or monte_carlo",
                other
            ))),
        }
    }
}

/// A pricing engine for vanilla options.
///
/// Engines hold only immutable configuration, so a single instance may be
/// shared across threads and called concurrently.
pub trait PricingEngine {
    /// Model implemented by this engine.
    fn model(&self) -> ModelKind;

    /// Prices one option.
    ///
    /// # Errors
    /// Validation errors for inputs the model cannot handle, convergence or
    /// numerical errors otherwise. Never returns a non-finite result.
    fn price(&self, params: &OptionParams) -> Result<PricingResult, PricingError>;
}

/// Static-dispatch wrapper over the concrete engines.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{OptionParams, OptionType};
/// use pricer_pricing::engine::{ModelKind, PricingEngine, PricingModel};
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let model = PricingModel::black_scholes();
/// let result = model.price(&params).unwrap();
/// assert_eq!(result.model, ModelKind::BlackScholes);
/// ```
#[derive(Clone, Debug)]
pub enum PricingModel {
    /// Closed-form engine
    BlackScholes(BlackScholesEngine),
    /// Lattice engine
    BinomialTree(BinomialTreeEngine),
    /// Simulation engine
    MonteCarlo(MonteCarloEngine),
}

impl PricingModel {
    /// Black-Scholes engine.
    pub fn black_scholes() -> Self {
        PricingModel::BlackScholes(BlackScholesEngine::new())
    }

    /// Binomial engine with its default configuration.
    pub fn binomial_tree() -> Self {
        PricingModel::BinomialTree(BinomialTreeEngine::default())
    }

    /// Monte Carlo engine with its default configuration.
    pub fn monte_carlo() -> Self {
        PricingModel::MonteCarlo(MonteCarloEngine::default())
    }

    /// Default-configured engine for the given model.
    pub fn from_kind(kind: ModelKind) -> Self {
        match kind {
            ModelKind::BlackScholes => Self::black_scholes(),
            ModelKind::BinomialTree => Self::binomial_tree(),
            ModelKind::MonteCarlo => Self::monte_carlo(),
        }
    }
}

impl PricingEngine for PricingModel {
    #[inline]
    fn model(&self) -> ModelKind {
        match self {
            PricingModel::BlackScholes(engine) => engine.model(),
            PricingModel::BinomialTree(engine) => engine.model(),
            PricingModel::MonteCarlo(engine) => engine.model(),
        }
    }

    #[inline]
    fn price(&self, params: &OptionParams) -> Result<PricingResult, PricingError> {
        match self {
            PricingModel::BlackScholes(engine) => engine.price(params),
            PricingModel::BinomialTree(engine) => engine.price(params),
            PricingModel::MonteCarlo(engine) => engine.price(params),
        }
    }
}

impl From<BlackScholesEngine> for PricingModel {
    fn from(engine: BlackScholesEngine) -> Self {
        PricingModel::BlackScholes(engine)
    }
}

impl From<BinomialTreeEngine> for PricingModel {
    fn from(engine: BinomialTreeEngine) -> Self {
        PricingModel::BinomialTree(engine)
    }
}

impl From<MonteCarloEngine> for PricingModel {
    fn from(engine: MonteCarloEngine) -> Self {
        PricingModel::MonteCarlo(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::instruments::{ExerciseStyle, OptionType};

    fn params() -> OptionParams {
        OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
    }

    #[test]
    fn test_model_kind_names() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.to_string().parse::<ModelKind>().unwrap(), kind);
        }
        assert_eq!("Monte-Carlo".parse::<ModelKind>().unwrap(), ModelKind::MonteCarlo);
        assert_eq!("binomial".parse::<ModelKind>().unwrap(), ModelKind::BinomialTree);
        assert!("heston".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_model_kind_ordering() {
        let mut kinds = vec![
            ModelKind::MonteCarlo,
            ModelKind::BlackScholes,
            ModelKind::BinomialTree,
        ];
        kinds.sort();
        assert_eq!(kinds, ModelKind::ALL.to_vec());
    }

    #[test]
    fn test_static_dispatch_reports_model() {
        for kind in ModelKind::ALL {
            let engine = PricingModel::from_kind(kind);
            assert_eq!(engine.model(), kind);
            assert_eq!(engine.price(&params()).unwrap().model, kind);
        }
    }

    #[test]
    fn test_american_rejected_by_black_scholes_only() {
        let american = params().with_exercise(ExerciseStyle::American);
        let err = PricingModel::black_scholes().price(&american).unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedExercise(_)));
        assert!(PricingModel::binomial_tree().price(&american).is_ok());
    }
}
