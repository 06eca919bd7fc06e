//! Expiry payoff and profit/loss diagrams.

use pricer_core::math::grid::linspace;

use super::position::{Position, PositionError};

/// Default number of points in a generated spot range.
pub const DEFAULT_DIAGRAM_POINTS: usize = 100;

/// Largest accepted number of points in a generated spot range.
pub const MAX_DIAGRAM_POINTS: usize = 100_000;

/// Position value at one terminal spot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffPoint {
    /// Terminal spot.
    pub spot: f64,
    /// Signed intrinsic value summed over legs.
    pub payoff: f64,
    /// Payoff net of premium paid or received.
    pub profit_loss: f64,
}

/// Inclusive, evenly spaced range of terminal spots.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpotRange {
    /// Lowest spot.
    pub start: f64,
    /// Highest spot.
    pub end: f64,
    /// Number of spots.
    pub points: usize,
}

impl SpotRange {
    /// Creates a validated range.
    ///
    /// # Errors
    /// `InvalidRange` unless `0 <= start <= end`, both finite, and `points`
    /// lies in `[1, 100_000]`.
    pub fn new(start: f64, end: f64, points: usize) -> Result<Self, PositionError> {
        if !(start.is_finite() && end.is_finite()) || start < 0.0 || start > end {
            return Err(PositionError::InvalidRange {
                message: format!(
                    "bounds [{}, {}] must be finite with 0 <= start <= end",
                    start, end
                ),
            });
        }
        if points == 0 || points > MAX_DIAGRAM_POINTS {
            return Err(PositionError::InvalidRange {
                message: format!("point count {} is outside [1, {}]", points, MAX_DIAGRAM_POINTS),
            });
        }
        Ok(Self { start, end, points })
    }

    /// Range spanning the strikes widened by `width` (relative) on each side.
    ///
    /// With strikes in `[K_lo, K_hi]` the range is
    /// `[max(0, K_lo·(1 − width)), K_hi·(1 + width)]`.
    pub fn around_strikes(
        position: &Position,
        width: f64,
        points: usize,
    ) -> Result<Self, PositionError> {
        if !(width.is_finite() && width >= 0.0) {
            return Err(PositionError::InvalidRange {
                message: format!("width {} must be finite and non-negative", width),
            });
        }
        let (lo, hi) = position.strike_bounds();
        Self::new((lo * (1.0 - width)).max(0.0), hi * (1.0 + width), points)
    }

    /// Spots in increasing order.
    pub fn spots(&self) -> Vec<f64> {
        // Bounds are validated finite, so linspace cannot fail here
        linspace(self.start, self.end, self.points).unwrap_or_default()
    }
}

/// Expiry valuation of multi-leg positions.
///
/// Stateless: no model, randomness or time value is involved.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::OptionType;
/// use pricer_risk::payoff::{OptionLeg, PayoffAnalyzer, Position};
///
/// let bull_spread = Position::new(vec![
///     OptionLeg::long(OptionType::Call, 95.0, 7.0),
///     OptionLeg::short(OptionType::Call, 105.0, 2.5),
/// ])
/// .unwrap();
///
/// let diagram = PayoffAnalyzer::payoff_diagram(&bull_spread, &[90.0, 100.0, 110.0]).unwrap();
/// assert_eq!(diagram[0].payoff, 0.0);
/// assert_eq!(diagram[2].payoff, 10.0);
/// assert_eq!(diagram[2].profit_loss, 5.5);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PayoffAnalyzer;

impl PayoffAnalyzer {
    /// Values `position` at each spot, in the order given.
    ///
    /// # Errors
    /// `InvalidSpot` for the first negative or non-finite spot.
    pub fn payoff_diagram(
        position: &Position,
        spots: &[f64],
    ) -> Result<Vec<PayoffPoint>, PositionError> {
        if let Some(&spot) = spots.iter().find(|s| !(s.is_finite() && **s >= 0.0)) {
            return Err(PositionError::InvalidSpot { spot });
        }

        Ok(spots
            .iter()
            .map(|&spot| {
                let (payoff, profit_loss) = position
                    .legs()
                    .iter()
                    .fold((0.0, 0.0), |(payoff, pnl), leg| {
                        (payoff + leg.payoff(spot), pnl + leg.profit_loss(spot))
                    });
                PayoffPoint {
                    spot,
                    payoff,
                    profit_loss,
                }
            })
            .collect())
    }

    /// Diagram over a generated spot range.
    pub fn payoff_diagram_over(
        position: &Position,
        range: &SpotRange,
    ) -> Result<Vec<PayoffPoint>, PositionError> {
        Self::payoff_diagram(position, &range.spots())
    }
}

/// Spots at which profit/loss crosses zero.
///
/// Consecutive points with opposite signs are joined linearly. A point with
/// exactly zero P&L is reported once. Expects the diagram sorted by spot.
pub fn breakeven_points(diagram: &[PayoffPoint]) -> Vec<f64> {
    let mut points: Vec<f64> = Vec::new();
    let mut push = |spot: f64| {
        if points.last().map_or(true, |&last| last != spot) {
            points.push(spot);
        }
    };

    for window in diagram.windows(2) {
        let (a, b) = (window[0], window[1]);
        if a.profit_loss == 0.0 {
            push(a.spot);
        } else if a.profit_loss * b.profit_loss < 0.0 {
            let t = a.profit_loss / (a.profit_loss - b.profit_loss);
            push(a.spot + t * (b.spot - a.spot));
        }
    }
    if let Some(last) = diagram.last() {
        if last.profit_loss == 0.0 {
            push(last.spot);
        }
    }
    points
}
