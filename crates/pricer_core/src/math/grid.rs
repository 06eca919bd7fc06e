//! Evenly spaced grids.

use num_traits::Float;

/// Returns `points` evenly spaced values from `start` to `end` inclusive.
///
/// A single point yields `[start]`. The last element is exactly `end`
/// so that range end points survive floating-point accumulation.
///
/// Returns `None` when `points == 0` or either end point is not finite.
///
/// # Examples
/// ```
/// use pricer_core::math::grid::linspace;
///
/// let grid = linspace(0.0_f64, 1.0, 3).unwrap();
/// assert_eq!(grid, vec![0.0, 0.5, 1.0]);
/// assert!(linspace(0.0_f64, 1.0, 0).is_none());
/// ```
pub fn linspace<T: Float>(start: T, end: T, points: usize) -> Option<Vec<T>> {
    if points == 0 || !start.is_finite() || !end.is_finite() {
        return None;
    }
    if points == 1 {
        return Some(vec![start]);
    }

    let intervals = T::from(points - 1)?;
    let step = (end - start) / intervals;

    let mut grid = Vec::with_capacity(points);
    for i in 0..points - 1 {
        grid.push(start + step * T::from(i)?);
    }
    grid.push(end);
    Some(grid)
}
