//! Running sample statistics.
//!
//! [`RunningStats`] accumulates count, mean and the sum of squared
//! deviations with Welford's update, and combines partial accumulators
//! with Chan's pairwise formula. Monte Carlo chunks are reduced this way
//! so that large path counts do not drift the way naive sum/sum-of-squares
//! accumulation does.

/// Welford accumulator for mean and variance.
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::RunningStats;
///
/// let mut left = RunningStats::new();
/// left.push(1.0);
/// left.push(2.0);
///
/// let mut right = RunningStats::new();
/// right.push(3.0);
/// right.push(4.0);
///
/// left.merge(&right);
/// assert_eq!(left.count(), 4);
/// assert!((left.mean() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let total = n_a + n_b;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / total;
        self.m2 += other.m2 + delta * delta * n_a * n_b / total;
        self.count += other.count;
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sample mean (0 when empty).
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance.
    ///
    /// Returns 0 with fewer than two observations and clamps the tiny
    /// negative values rounding can leave behind.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let variance = self.m2 / (self.count - 1) as f64;
        // NaN must survive so callers can detect degenerate samples
        if variance < 0.0 {
            0.0
        } else {
            variance
        }
    }

    /// Sample standard deviation.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }

    /// Standard error of the mean, `std_dev / √n` (0 when empty).
    pub fn std_error(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.std_dev() / (self.count as f64).sqrt()
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = RunningStats::new();
        for value in iter {
            stats.push(value);
        }
        stats
    }
}

impl Extend<f64> for RunningStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // ==========================================================
    // Basic Moments
    // ==========================================================

    #[test]
    fn test_empty_stats() {
        let stats = RunningStats::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.sample_variance(), 0.0);
        assert_eq!(stats.std_error(), 0.0);
    }

    #[test]
    fn test_single_observation_has_zero_variance() {
        let stats: RunningStats = std::iter::once(7.5).collect();
        assert_eq!(stats.mean(), 7.5);
        assert_eq!(stats.sample_variance(), 0.0);
        assert_eq!(stats.std_error(), 0.0);
    }

    #[test]
    fn test_known_sample() {
        let stats: RunningStats = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .into_iter()
            .collect();
        assert_relative_eq!(stats.mean(), 5.0, epsilon = 1e-12);
        // Population variance is 4; sample variance is 32/7
        assert_relative_eq!(stats.sample_variance(), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(
            stats.std_error(),
            (32.0_f64 / 7.0).sqrt() / 8.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_constant_sample_has_zero_variance() {
        let stats: RunningStats = std::iter::repeat(3.25).take(10_000).collect();
        assert_eq!(stats.sample_variance(), 0.0);
        assert_eq!(stats.std_error(), 0.0);
    }

    #[test]
    fn test_large_offset_stability() {
        // Naive sum-of-squares loses all precision here
        let offset = 1e9;
        let stats: RunningStats = (0..1000).map(|i| offset + (i % 2) as f64).collect();
        assert_relative_eq!(stats.mean(), offset + 0.5, epsilon = 1e-5);
        assert_relative_eq!(stats.sample_variance(), 0.25 * 1000.0 / 999.0, epsilon = 1e-4);
    }

    // ==========================================================
    // Merge
    // ==========================================================

    #[test]
    fn test_merge_with_empty() {
        let mut stats: RunningStats = [1.0, 2.0, 3.0].into_iter().collect();
        let before = stats;
        stats.merge(&RunningStats::new());
        assert_eq!(stats, before);

        let mut empty = RunningStats::new();
        empty.merge(&before);
        assert_eq!(empty, before);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_merge_matches_sequential(
            values in proptest::collection::vec(-1e3_f64..1e3, 2..200),
            split in 0usize..200,
        ) {
            let split = split % values.len();
            let sequential: RunningStats = values.iter().copied().collect();

            let mut left: RunningStats = values[..split].iter().copied().collect();
            let right: RunningStats = values[split..].iter().copied().collect();
            left.merge(&right);

            prop_assert_eq!(left.count(), sequential.count());
            prop_assert!((left.mean() - sequential.mean()).abs() < 1e-9);
            prop_assert!(
                (left.sample_variance() - sequential.sample_variance()).abs()
                    < 1e-7 * (1.0 + sequential.sample_variance())
            );
        }
    }
}
