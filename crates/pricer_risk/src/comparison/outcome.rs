//! Per-model comparison outcomes.

use std::collections::BTreeMap;

use pricer_core::types::PricingError;
use pricer_pricing::engine::ModelKind;
use pricer_pricing::greeks::PricingResult;

/// Result of one model in a comparison.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModelOutcome {
    /// The model priced the option.
    Priced(PricingResult),
    /// The model rejected the input.
    Rejected(PricingError),
}

impl ModelOutcome {
    /// Successful result, if any.
    pub fn result(&self) -> Option<&PricingResult> {
        match self {
            ModelOutcome::Priced(result) => Some(result),
            ModelOutcome::Rejected(_) => None,
        }
    }

    /// Rejection reason, if any.
    pub fn error(&self) -> Option<&PricingError> {
        match self {
            ModelOutcome::Priced(_) => None,
            ModelOutcome::Rejected(err) => Some(err),
        }
    }

    /// True when the model produced a price.
    #[inline]
    pub fn is_priced(&self) -> bool {
        matches!(self, ModelOutcome::Priced(_))
    }
}

impl From<Result<PricingResult, PricingError>> for ModelOutcome {
    fn from(result: Result<PricingResult, PricingError>) -> Self {
        match result {
            Ok(result) => ModelOutcome::Priced(result),
            Err(err) => ModelOutcome::Rejected(err),
        }
    }
}

/// Outcome of every configured model on one parameter snapshot.
///
/// Keyed by [`ModelKind`], so iteration follows reporting order
/// (Black-Scholes, binomial, Monte Carlo).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonResult {
    outcomes: BTreeMap<ModelKind, ModelOutcome>,
}

impl ComparisonResult {
    pub(crate) fn new(outcomes: BTreeMap<ModelKind, ModelOutcome>) -> Self {
        Self { outcomes }
    }

    /// Outcome for one model.
    pub fn get(&self, kind: ModelKind) -> Option<&ModelOutcome> {
        self.outcomes.get(&kind)
    }

    /// All outcomes in model order.
    pub fn outcomes(&self) -> impl Iterator<Item = (ModelKind, &ModelOutcome)> {
        self.outcomes.iter().map(|(kind, outcome)| (*kind, outcome))
    }

    /// Models that produced a price.
    pub fn priced(&self) -> impl Iterator<Item = (ModelKind, &PricingResult)> {
        self.outcomes()
            .filter_map(|(kind, outcome)| outcome.result().map(|result| (kind, result)))
    }

    /// Models that rejected the input.
    pub fn rejected(&self) -> impl Iterator<Item = (ModelKind, &PricingError)> {
        self.outcomes()
            .filter_map(|(kind, outcome)| outcome.error().map(|err| (kind, err)))
    }

    /// Number of models compared.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when no models were compared.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Largest minus smallest price over the priced models.
    ///
    /// `None` when nothing priced.
    pub fn price_spread(&self) -> Option<f64> {
        let (min, max) = self.priced().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), (_, result)| (min.min(result.price), max.max(result.price)),
        );
        (min <= max).then(|| max - min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> ComparisonResult {
        let mut outcomes = BTreeMap::new();
        outcomes.insert(
            ModelKind::MonteCarlo,
            ModelOutcome::Priced(PricingResult::new(ModelKind::MonteCarlo, 10.5)),
        );
        outcomes.insert(
            ModelKind::BlackScholes,
            ModelOutcome::Rejected(PricingError::UnsupportedExercise("american".to_string())),
        );
        outcomes.insert(
            ModelKind::BinomialTree,
            ModelOutcome::Priced(PricingResult::new(ModelKind::BinomialTree, 10.2)),
        );
        ComparisonResult::new(outcomes)
    }

    #[test]
    fn test_iteration_follows_model_order() {
        let kinds: Vec<ModelKind> = sample().outcomes().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, ModelKind::ALL.to_vec());
    }

    #[test]
    fn test_priced_and_rejected_partition() {
        let result = sample();
        assert_eq!(result.priced().count(), 2);
        let rejected: Vec<ModelKind> = result.rejected().map(|(kind, _)| kind).collect();
        assert_eq!(rejected, vec![ModelKind::BlackScholes]);
        assert!(!result.get(ModelKind::BlackScholes).unwrap().is_priced());
    }

    #[test]
    fn test_price_spread() {
        assert_relative_eq!(sample().price_spread().unwrap(), 0.3, epsilon = 1e-12);
        assert_eq!(ComparisonResult::new(BTreeMap::new()).price_spread(), None);
    }
}
