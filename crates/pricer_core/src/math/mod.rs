//! Numerical building blocks.
//!
//! - [`solvers`]: Newton-Raphson and bisection root finders
//! - [`statistics`]: Welford running moments with parallel merge
//! - [`grid`]: Evenly spaced value grids

pub mod grid;
pub mod solvers;
pub mod statistics;
