//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder with explicit derivative.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a root. It fails when:
/// - The derivative is near zero (`DerivativeNearZero`)
/// - An iterate leaves the admissible domain (`OutOfDomain`)
/// - The iteration budget runs out (`MaxIterationsExceeded`)
///
/// Callers that need a guaranteed answer fall back to
/// [`BisectionSolver`](super::BisectionSolver) on any of these.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
    /// Derivative magnitude below which a step is refused
    derivative_epsilon: T,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    ///
    /// The derivative threshold defaults to 1e-30.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self {
            config,
            derivative_epsilon: T::from(1e-30).unwrap_or_else(T::min_positive_value),
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Sets the derivative magnitude below which the solver stops with
    /// `DerivativeNearZero`.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    /// use pricer_core::types::SolverError;
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default())
    ///     .with_derivative_epsilon(1e-8);
    ///
    /// // Derivative 1e-9 is treated as flat
    /// let result = solver.find_root(|x: f64| 1e-9 * x + 1.0, |_| 1e-9, 0.0);
    /// assert!(matches!(result, Err(SolverError::DerivativeNearZero { .. })));
    /// ```
    pub fn with_derivative_epsilon(mut self, epsilon: T) -> Self {
        self.derivative_epsilon = epsilon.abs();
        self
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    /// * `Err(SolverError::NumericalInstability)` - Non-finite iterate
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // Solve x³ - x - 2 = 0
    /// let f = |x: f64| x * x * x - x - 2.0;
    /// let f_prime = |x: f64| 3.0 * x * x - 1.0;
    ///
    /// let root = solver.find_root(f, f_prime, 1.5).unwrap();
    /// assert!((f(root)).abs() < 1e-10);
    /// ```
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.find_root_within(f, f_prime, x0, T::neg_infinity(), T::infinity())
    }

    /// Find a root of `f` while keeping every iterate inside `[lower, upper]`.
    ///
    /// An iterate outside the interval stops the solver with
    /// `SolverError::OutOfDomain` instead of being clamped, so callers can
    /// switch to a bracketing method.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    /// use pricer_core::types::SolverError;
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // The step from x = 0.1 overshoots to x = 5.05 (f = x² - 1 has root 1)
    /// let result = solver.find_root_within(|x: f64| x * x - 1.0, |x| 2.0 * x, 0.1, 0.0, 2.0);
    /// assert!(matches!(result, Err(SolverError::OutOfDomain { .. })));
    /// ```
    pub fn find_root_within<F, G>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
        lower: T,
        upper: T,
    ) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let mut x = x0;

        if x < lower || x > upper {
            return Err(SolverError::OutOfDomain {
                x: x.to_f64().unwrap_or(f64::NAN),
            });
        }

        for _iteration in 0..self.config.max_iterations {
            let f_val = f(x);

            if !f_val.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "objective evaluated to non-finite value".to_string(),
                ));
            }

            // Check for convergence
            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x);

            // Check for near-zero derivative
            if !(f_prime_val.abs() >= self.derivative_epsilon) {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            #[allow(clippy::assign_op_pattern)]
            {
                x = x - f_val / f_prime_val;
            }

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }

            if x < lower || x > upper {
                return Err(SolverError::OutOfDomain {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            last_estimate: x.to_f64().unwrap_or(f64::NAN),
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
