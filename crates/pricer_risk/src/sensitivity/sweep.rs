//! Parallel one-factor sweeps.

use pricer_core::types::PricingError;
use pricer_models::instruments::{OptionParams, ParamField};
use pricer_pricing::engine::PricingEngine;
use pricer_pricing::greeks::{Greek, PricingResult};
use tracing::debug;

use super::range::SweepRange;
use crate::parallel::try_parallel_map;

/// One evaluated point of a sweep.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityPoint {
    /// Value assigned to the swept field.
    pub value: f64,
    /// Engine output at that value.
    pub result: PricingResult,
}

/// Ordered sweep output for a single field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityGrid {
    field: ParamField,
    points: Vec<SensitivityPoint>,
}

impl SensitivityGrid {
    /// Swept field.
    #[inline]
    pub fn field(&self) -> ParamField {
        self.field
    }

    /// Points in input order.
    #[inline]
    pub fn points(&self) -> &[SensitivityPoint] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a grid produced by a sweep.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &SensitivityPoint> {
        self.points.iter()
    }

    /// Swept input values.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Prices at each point.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.result.price).collect()
    }

    /// One Greek at each point, `None` where the engine did not estimate it.
    pub fn greek(&self, greek: Greek) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|p| p.result.greeks.and_then(|g| g.get(greek)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SensitivityGrid {
    type Item = &'a SensitivityPoint;
    type IntoIter = std::slice::Iter<'a, SensitivityPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Prices an option across values of one input with a caller-chosen engine.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{OptionParams, OptionType, ParamField};
/// use pricer_pricing::analytical::BlackScholesEngine;
/// use pricer_risk::sensitivity::SensitivityAnalyzer;
///
/// let base = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let analyzer = SensitivityAnalyzer::new(BlackScholesEngine::new());
///
/// let grid = analyzer.sweep(&base, ParamField::Spot, &[90.0, 100.0, 110.0]).unwrap();
/// let prices = grid.prices();
/// assert!(prices[0] < prices[1] && prices[1] < prices[2]);
/// ```
#[derive(Clone, Debug)]
pub struct SensitivityAnalyzer<E> {
    engine: E,
}

impl<E: PricingEngine + Sync> SensitivityAnalyzer<E> {
    /// Creates an analyzer around `engine`.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Engine used at every point.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Prices `base` with `field` replaced by each of `values`.
    ///
    /// `base` is never modified. Points are evaluated in parallel and
    /// returned in input order.
    ///
    /// # Errors
    /// `InvalidInput` for an empty `values`. Otherwise the error of the first
    /// point (by position) that fails validation or pricing; no partial grid
    /// is returned.
    pub fn sweep(
        &self,
        base: &OptionParams,
        field: ParamField,
        values: &[f64],
    ) -> Result<SensitivityGrid, PricingError> {
        if values.is_empty() {
            return Err(PricingError::InvalidInput(format!(
                "sensitivity sweep over {} needs at least one value",
                field
            )));
        }

        debug!(
            model = %self.engine.model(),
            field = %field,
            points = values.len(),
            "Sensitivity sweep"
        );

        let points = try_parallel_map(values, |&value| {
            let params = base.with_field(field, value)?;
            let result = self.engine.price(&params)?;
            Ok::<_, PricingError>(SensitivityPoint { value, result })
        })?;

        Ok(SensitivityGrid { field, points })
    }

    /// Generates a grid around the current value of `field` and sweeps it.
    pub fn sweep_range(
        &self,
        base: &OptionParams,
        field: ParamField,
        range: &SweepRange,
    ) -> Result<SensitivityGrid, PricingError> {
        let values = range.grid_for(field, base.field(field))?;
        self.sweep(base, field, &values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{ExerciseStyle, OptionType};
    use pricer_pricing::analytical::BlackScholesEngine;
    use pricer_pricing::engine::{ModelKind, PricingModel};
    use pricer_pricing::lattice::BinomialTreeEngine;
    use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};

    fn base() -> OptionParams {
        OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
    }

    // ========================================================================
    // Ordering and Base Immutability
    // ========================================================================

    #[test]
    fn test_sweep_keeps_input_order() {
        let analyzer = SensitivityAnalyzer::new(BlackScholesEngine::new());
        let values = [120.0, 80.0, 100.0, 95.0];
        let grid = analyzer.sweep(&base(), ParamField::Spot, &values).unwrap();

        assert_eq!(grid.field(), ParamField::Spot);
        assert_eq!(grid.values(), values.to_vec());
        for point in &grid {
            let direct = BlackScholesEngine::new()
                .price(&base().with_field(ParamField::Spot, point.value).unwrap())
                .unwrap();
            assert_eq!(point.result, direct);
        }
    }

    #[test]
    fn test_volatility_sweep_raises_price() {
        let analyzer = SensitivityAnalyzer::new(BlackScholesEngine::new());
        let grid = analyzer
            .sweep_range(&base(), ParamField::Volatility, &SweepRange::new(0.5, 11).unwrap())
            .unwrap();

        assert_eq!(grid.len(), 11);
        assert_relative_eq!(grid.values()[0], 0.1, epsilon = 1e-12);
        assert!(grid.prices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_greek_column() {
        let grid = SensitivityAnalyzer::new(BinomialTreeEngine::default())
            .sweep(&base(), ParamField::Strike, &[90.0, 110.0])
            .unwrap();

        assert!(grid.greek(Greek::Delta).iter().all(Option::is_some));
        assert!(grid.greek(Greek::Vega).iter().all(Option::is_none));
    }

    // ========================================================================
    // Error Policy
    // ========================================================================

    #[test]
    fn test_empty_values_rejected() {
        let err = SensitivityAnalyzer::new(BlackScholesEngine::new())
            .sweep(&base(), ParamField::Rate, &[])
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_point_fails_whole_sweep() {
        let err = SensitivityAnalyzer::new(BlackScholesEngine::new())
            .sweep(&base(), ParamField::Volatility, &[0.1, 0.0, 0.3, -0.2])
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("volatility"));
    }

    #[test]
    fn test_engine_rejection_propagates() {
        let american = base().with_exercise(ExerciseStyle::American);
        let err = SensitivityAnalyzer::new(PricingModel::from_kind(ModelKind::BlackScholes))
            .sweep(&american, ParamField::Spot, &[100.0])
            .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedExercise(_)));
    }

    // ========================================================================
    // Common Random Numbers
    // ========================================================================

    #[test]
    fn test_seeded_mc_sweep_is_reproducible() {
        let engine = MonteCarloEngine::new(
            MonteCarloConfig::builder()
                .simulations(5_000)
                .seed(7)
                .build()
                .unwrap(),
        )
        .unwrap();
        let analyzer = SensitivityAnalyzer::new(engine);
        let values = [95.0, 100.0, 105.0];

        let a = analyzer.sweep(&base(), ParamField::Spot, &values).unwrap();
        let b = analyzer.sweep(&base(), ParamField::Spot, &values).unwrap();
        assert_eq!(a, b);
        // Shared draws keep the price curve monotone in spot
        assert!(a.prices().windows(2).all(|w| w[0] < w[1]));
    }
}
