//! Bisection root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Bisection root finder.
///
/// Halves a sign-changing bracket until `|f(mid)| < tolerance` or the
/// bracket width falls below `tolerance`. Slow (linear) but unconditionally
/// convergent for continuous functions, which makes it the safeguard
/// behind Newton-Raphson.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BisectionSolver, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::new(1e-12, 200));
///
/// let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` in the bracket `[a, b]`.
    ///
    /// End points may be given in either order.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root with `|f(x)| < tolerance` or bracket narrower than tolerance
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have the same sign
    /// * `Err(SolverError::NumericalInstability)` - Non-finite function value
    /// * `Err(SolverError::MaxIterationsExceeded)` - Budget exhausted; carries the midpoint
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
        let mut f_lo = f(lo);
        let f_hi = f(hi);

        if !f_lo.is_finite() || !f_hi.is_finite() {
            return Err(SolverError::NumericalInstability(
                "bracket end point evaluated to non-finite value".to_string(),
            ));
        }

        if f_lo.abs() < self.config.tolerance {
            return Ok(lo);
        }
        if f_hi.abs() < self.config.tolerance {
            return Ok(hi);
        }

        // Check for valid bracket
        if f_lo.signum() == f_hi.signum() {
            return Err(SolverError::NoBracket {
                a: lo.to_f64().unwrap_or(f64::NAN),
                b: hi.to_f64().unwrap_or(f64::NAN),
            });
        }

        let two = T::one() + T::one();
        let mut mid = (lo + hi) / two;

        for _iteration in 0..self.config.max_iterations {
            mid = lo + (hi - lo) / two;
            let f_mid = f(mid);

            if !f_mid.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "bisection midpoint evaluated to non-finite value".to_string(),
                ));
            }

            if f_mid.abs() < self.config.tolerance || (hi - lo) / two < self.config.tolerance {
                return Ok(mid);
            }

            if f_mid.signum() == f_lo.signum() {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            last_estimate: mid.to_f64().unwrap_or(f64::NAN),
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
