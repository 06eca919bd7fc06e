//! # pricer_core: Numerical Foundation for the Option Pricing Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Error taxonomy shared by every engine (`types::error`)
//! - Root-finding solvers used for implied volatility (`math::solvers`)
//! - Numerically stable running statistics for Monte Carlo reduction (`math::statistics`)
//! - Evenly spaced grids for sweeps and payoff diagrams (`math::grid`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::grid::linspace;
//! use pricer_core::math::statistics::RunningStats;
//!
//! let grid = linspace(80.0, 120.0, 5).unwrap();
//! assert_eq!(grid, vec![80.0, 90.0, 100.0, 110.0, 120.0]);
//!
//! let stats: RunningStats = grid.iter().copied().collect();
//! assert!((stats.mean() - 100.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
