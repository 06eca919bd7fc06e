//! Sweep grid generation.

use pricer_core::math::grid::linspace;
use pricer_core::types::PricingError;
use pricer_models::instruments::ParamField;

/// Default relative variation either side of the base value.
pub const DEFAULT_VARIATION: f64 = 0.2;

/// Default number of grid points.
pub const DEFAULT_POINTS: usize = 50;

/// Largest accepted number of grid points.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Shortest expiry generated for a time sweep, in years.
pub const MIN_SWEEP_EXPIRY: f64 = 0.01;

/// Evenly spaced range `base·(1 − variation) ..= base·(1 + variation)`.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::ParamField;
/// use pricer_risk::sensitivity::SweepRange;
///
/// let spots = SweepRange::around(100.0, 0.2, 5).unwrap();
/// assert_eq!(spots, vec![80.0, 90.0, 100.0, 110.0, 120.0]);
///
/// // Expiry sweeps never reach zero time
/// let expiries = SweepRange::new(1.0, 3).unwrap().grid_for(ParamField::Expiry, 0.5).unwrap();
/// assert_eq!(expiries[0], 0.01);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepRange {
    variation: f64,
    points: usize,
}

impl SweepRange {
    /// Creates a validated range specification.
    ///
    /// # Errors
    /// `InvalidInput` if `variation` is negative or non-finite, or `points`
    /// is outside `[1, 10_000]`.
    pub fn new(variation: f64, points: usize) -> Result<Self, PricingError> {
        if !variation.is_finite() || variation < 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "sweep variation must be finite and non-negative, got {}",
                variation
            )));
        }
        if points == 0 || points > MAX_SWEEP_POINTS {
            return Err(PricingError::InvalidInput(format!(
                "sweep point count {} is outside [1, {}]",
                points, MAX_SWEEP_POINTS
            )));
        }
        Ok(Self { variation, points })
    }

    /// Grid around `base_value` in one call.
    pub fn around(
        base_value: f64,
        variation: f64,
        points: usize,
    ) -> Result<Vec<f64>, PricingError> {
        Self::new(variation, points)?.grid(base_value)
    }

    /// Relative variation.
    #[inline]
    pub fn variation(&self) -> f64 {
        self.variation
    }

    /// Number of points.
    #[inline]
    pub fn points(&self) -> usize {
        self.points
    }

    /// Grid around `base_value`.
    ///
    /// # Errors
    /// `InvalidInput` if `base_value` is not finite.
    pub fn grid(&self, base_value: f64) -> Result<Vec<f64>, PricingError> {
        self.span(base_value.is_finite().then_some(base_value), |lo, hi| (lo, hi))
    }

    /// Grid around `base_value` for a given field.
    ///
    /// Expiry grids are floored at [`MIN_SWEEP_EXPIRY`].
    pub fn grid_for(&self, field: ParamField, base_value: f64) -> Result<Vec<f64>, PricingError> {
        let finite = base_value.is_finite().then_some(base_value);
        match field {
            ParamField::Expiry => self.span(finite, |lo, hi| {
                (lo.max(MIN_SWEEP_EXPIRY), hi.max(MIN_SWEEP_EXPIRY))
            }),
            _ => self.span(finite, |lo, hi| (lo, hi)),
        }
    }

    fn span(
        &self,
        base_value: Option<f64>,
        adjust: impl Fn(f64, f64) -> (f64, f64),
    ) -> Result<Vec<f64>, PricingError> {
        let base = base_value.ok_or_else(|| {
            PricingError::InvalidInput("sweep base value must be finite".to_string())
        })?;
        let (lo, hi) = adjust(base * (1.0 - self.variation), base * (1.0 + self.variation));
        linspace(lo, hi, self.points).ok_or_else(|| {
            PricingError::NumericalDegeneracy(format!(
                "sweep bounds [{}, {}] are not finite",
                lo, hi
            ))
        })
    }
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            variation: DEFAULT_VARIATION,
            points: DEFAULT_POINTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_range() {
        let grid = SweepRange::default().grid(100.0).unwrap();
        assert_eq!(grid.len(), 50);
        assert_relative_eq!(grid[0], 80.0, epsilon = 1e-12);
        assert_relative_eq!(grid[49], 120.0, epsilon = 1e-12);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_point_is_lower_end() {
        assert_eq!(SweepRange::around(0.3, 0.5, 1).unwrap(), vec![0.15]);
    }

    #[test]
    fn test_expiry_floor() {
        let range = SweepRange::new(0.99, 4).unwrap();
        let grid = range.grid_for(ParamField::Expiry, 0.5).unwrap();
        assert_eq!(grid[0], MIN_SWEEP_EXPIRY);
        assert!(grid.iter().all(|&t| t >= MIN_SWEEP_EXPIRY));

        // Other fields are not floored
        let vol = range.grid_for(ParamField::Volatility, 0.5).unwrap();
        assert!(vol[0] < MIN_SWEEP_EXPIRY);
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(SweepRange::new(-0.1, 10).is_err());
        assert!(SweepRange::new(f64::NAN, 10).is_err());
        assert!(SweepRange::new(0.2, 0).is_err());
        assert!(SweepRange::new(0.2, MAX_SWEEP_POINTS + 1).is_err());
        assert!(SweepRange::default().grid(f64::INFINITY).is_err());
    }
}
