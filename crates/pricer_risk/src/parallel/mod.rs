//! Rayon-based parallelisation utilities.
//!
//! Sweeps and comparisons evaluate independent points; these helpers map
//! them in parallel while keeping input order in the output.

use rayon::prelude::*;

/// Parallel map preserving input order.
///
/// # Arguments
///
/// * `items` - Slice of items to process
/// * `mapper` - Function to apply to each item
///
/// # Returns
///
/// Vector of mapped results, one per item, in input order.
pub fn parallel_map<T, R, F>(items: &[T], mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    items.par_iter().map(mapper).collect()
}

/// Fallible parallel map preserving input order.
///
/// Every item is evaluated. If any fail, the error of the earliest failing
/// item (by input position) is returned, so the outcome does not depend on
/// thread scheduling.
///
/// # Examples
///
/// ```
/// use pricer_risk::parallel::try_parallel_map;
///
/// let items = [1, 2, -3, -4];
/// let result: Result<Vec<i32>, String> =
///     try_parallel_map(&items, |&x| if x > 0 { Ok(x) } else { Err(format!("bad {}", x)) });
/// assert_eq!(result, Err("bad -3".to_string()));
/// ```
pub fn try_parallel_map<T, R, E, F>(items: &[T], mapper: F) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync + Send,
{
    parallel_map(items, mapper).into_iter().collect()
}
