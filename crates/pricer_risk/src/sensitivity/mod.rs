//! One-factor sensitivity sweeps.
//!
//! - [`SweepRange`]: evenly spaced values around a base input
//! - [`SensitivityAnalyzer`]: prices each value in parallel with any engine
//! - [`SensitivityGrid`]: ordered `(value, result)` points with column helpers

mod range;
mod sweep;

pub use range::{SweepRange, DEFAULT_POINTS, DEFAULT_VARIATION, MAX_SWEEP_POINTS, MIN_SWEEP_EXPIRY};
pub use sweep::{SensitivityAnalyzer, SensitivityGrid, SensitivityPoint};
