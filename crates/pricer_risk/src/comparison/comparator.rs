//! Side-by-side pricing with every engine.

use std::collections::BTreeMap;

use pricer_core::types::PricingError;
use pricer_models::instruments::OptionParams;
use pricer_pricing::analytical::BlackScholesEngine;
use pricer_pricing::engine::{PricingEngine, PricingModel};
use pricer_pricing::lattice::{BinomialTreeEngine, LatticeConfig};
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
use tracing::{debug, warn};

use super::outcome::{ComparisonResult, ModelOutcome};
use crate::parallel::parallel_map;

/// Seed used by the comparator's Monte Carlo engine unless overridden.
pub const DEFAULT_COMPARISON_SEED: u64 = 42;

/// Engine settings for a comparison.
///
/// Defaults: 100 lattice steps; 10,000 Monte Carlo paths, seed 42, no Greeks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparatorConfig {
    /// Binomial lattice settings.
    pub lattice: LatticeConfig,
    /// Monte Carlo settings.
    pub monte_carlo: MonteCarloConfig,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            lattice: LatticeConfig::default(),
            monte_carlo: MonteCarloConfig::default().with_seed(Some(DEFAULT_COMPARISON_SEED)),
        }
    }
}

/// Prices one parameter snapshot with all three models.
///
/// A model that rejects the input is recorded as
/// [`ModelOutcome::Rejected`] while the others still price.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{ExerciseStyle, OptionParams, OptionType};
/// use pricer_pricing::engine::ModelKind;
/// use pricer_risk::comparison::ModelComparator;
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put)
///     .unwrap()
///     .with_exercise(ExerciseStyle::American);
///
/// let comparison = ModelComparator::default().compare(&params).unwrap();
/// assert_eq!(comparison.len(), 3);
/// assert!(!comparison.get(ModelKind::BlackScholes).unwrap().is_priced());
/// assert!(comparison.get(ModelKind::BinomialTree).unwrap().is_priced());
/// ```
#[derive(Clone, Debug)]
pub struct ModelComparator {
    models: Vec<PricingModel>,
}

impl ModelComparator {
    /// Creates a comparator from validated engine settings.
    ///
    /// # Errors
    /// The configuration error of the first invalid engine.
    pub fn new(config: ComparatorConfig) -> Result<Self, PricingError> {
        Ok(Self {
            models: vec![
                BlackScholesEngine::new().into(),
                BinomialTreeEngine::new(config.lattice)?.into(),
                MonteCarloEngine::new(config.monte_carlo)?.into(),
            ],
        })
    }

    /// Engines in reporting order.
    pub fn models(&self) -> &[PricingModel] {
        &self.models
    }

    /// Prices `params` with every model in parallel.
    ///
    /// # Errors
    /// `InvalidInput` listing each reason when every model rejects the input.
    pub fn compare(&self, params: &OptionParams) -> Result<ComparisonResult, PricingError> {
        debug!(
            models = self.models.len(),
            exercise = %params.exercise(),
            "Comparing models"
        );

        let outcomes: BTreeMap<_, _> = parallel_map(&self.models, |model| {
            (model.model(), ModelOutcome::from(model.price(params)))
        })
        .into_iter()
        .collect();

        let comparison = ComparisonResult::new(outcomes);
        for (kind, err) in comparison.rejected() {
            warn!(model = %kind, error = %err, "Model rejected comparison input");
        }

        if comparison.priced().next().is_none() {
            let reasons: Vec<String> = comparison
                .rejected()
                .map(|(kind, err)| format!("{}: {}", kind, err))
                .collect();
            return Err(PricingError::InvalidInput(format!(
                "no model could price the option ({})",
                reasons.join("; ")
            )));
        }

        Ok(comparison)
    }
}

impl Default for ModelComparator {
    fn default() -> Self {
        Self {
            models: vec![
                BlackScholesEngine::new().into(),
                BinomialTreeEngine::default().into(),
                MonteCarloEngine::default()
                    .with_seed(Some(DEFAULT_COMPARISON_SEED))
                    .into(),
            ],
        }
    }
}
