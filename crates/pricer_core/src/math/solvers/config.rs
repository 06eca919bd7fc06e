//! Solver configuration types.

use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// Shared by [`NewtonRaphsonSolver`](super::NewtonRaphsonSolver) and
/// [`BisectionSolver`](super::BisectionSolver).
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// let custom = SolverConfig {
///     tolerance: 1e-12,
///     max_iterations: 200,
/// };
/// assert_eq!(custom.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance on the residual.
    ///
    /// The solver stops when `|f(x)| < tolerance`.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    ///
    /// Exhausting the budget yields `SolverError::MaxIterationsExceeded`
    /// carrying the last iterate.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`. Use
    /// [`SolverConfig::try_new`] for values coming from user input.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Fallible counterpart of [`SolverConfig::new`].
    ///
    /// Returns `None` for a non-positive or non-finite tolerance or a zero
    /// iteration budget.
    pub fn try_new(tolerance: T, max_iterations: usize) -> Option<Self> {
        if !(tolerance > T::zero()) || !tolerance.is_finite() || max_iterations == 0 {
            return None;
        }
        Some(Self {
            tolerance,
            max_iterations,
        })
    }

    /// Settings for implied volatility inversion.
    ///
    /// Tolerance 1e-6 on the price residual, 100 iterations.
    pub fn implied_volatility() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }

    /// Tight tolerance (1e-14) and 500 iterations.
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-14).unwrap_or_else(T::epsilon),
            max_iterations: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_new_config() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-12, 200);
        assert!((config.tolerance - 1e-12).abs() < 1e-17);
        assert_eq!(config.max_iterations, 200);
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_new_config_zero_tolerance_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(0.0, 100);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_new_config_zero_iterations_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(1e-8, 0);
    }

    #[test]
    fn test_try_new_rejects_invalid() {
        assert!(SolverConfig::<f64>::try_new(0.0, 10).is_none());
        assert!(SolverConfig::<f64>::try_new(-1e-6, 10).is_none());
        assert!(SolverConfig::<f64>::try_new(f64::NAN, 10).is_none());
        assert!(SolverConfig::<f64>::try_new(1e-6, 0).is_none());
        assert_eq!(
            SolverConfig::<f64>::try_new(1e-6, 10),
            Some(SolverConfig::new(1e-6, 10))
        );
    }

    #[test]
    fn test_implied_volatility_preset() {
        let config: SolverConfig<f64> = SolverConfig::implied_volatility();
        assert!((config.tolerance - 1e-6).abs() < 1e-18);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_high_precision_config() {
        let config: SolverConfig<f64> = SolverConfig::high_precision();
        assert!(config.tolerance < 1e-12);
        assert!(config.max_iterations >= 500);
    }
}
