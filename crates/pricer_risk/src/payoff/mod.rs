//! Expiry payoff analysis for multi-leg option positions.
//!
//! - [`Position`] / [`OptionLeg`] / [`Side`]: validated legs
//! - [`PayoffAnalyzer`]: payoff and profit/loss per terminal spot
//! - [`SpotRange`]: evenly spaced spots, optionally centred on the strikes
//! - [`breakeven_points`]: zero crossings of profit/loss

mod diagram;
mod position;

pub use diagram::{
    breakeven_points, PayoffAnalyzer, PayoffPoint, SpotRange, DEFAULT_DIAGRAM_POINTS,
    MAX_DIAGRAM_POINTS,
};
pub use position::{OptionLeg, Position, PositionError, Side};
