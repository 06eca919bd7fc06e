//! Root-finding solvers for numerical computation.
//!
//! Designed for implied volatility inversion, where a fast derivative-based
//! method is paired with a bracketing safeguard.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using an explicit derivative,
//!   optionally restricted to a domain
//! - [`BisectionSolver`]: Guaranteed convergence on a sign-changing bracket
//!
//! ## Configuration
//!
//! Both solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance on `|f(x)|` (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use pricer_core::math::solvers::{BisectionSolver, NewtonRaphsonSolver, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//! let f_prime = |x: f64| 2.0 * x;
//!
//! let newton = NewtonRaphsonSolver::new(SolverConfig::default());
//! let root = newton
//!     .find_root_within(f, f_prime, 1.0, 0.0, 2.0)
//!     .or_else(|_| BisectionSolver::new(SolverConfig::new(1e-12, 200)).find_root(f, 0.0, 2.0))
//!     .unwrap();
//!
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod bisection;
mod config;
mod newton_raphson;

pub use bisection::BisectionSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
