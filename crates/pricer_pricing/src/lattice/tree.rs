//! Full binomial lattice snapshot.
//!
//! Nodes live in one triangular arena. Node `j` of level `i` sits at index
//! `i(i+1)/2 + j`, with `j = 0` the lowest spot on that level.

use super::binomial::CrrLattice;

#[inline]
fn node_index(level: usize, node: usize) -> usize {
    level * (level + 1) / 2 + node
}

/// Spot and option values at every node of a priced lattice.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{OptionParams, OptionType};
/// use pricer_pricing::lattice::BinomialTreeEngine;
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
/// let tree = BinomialTreeEngine::default().build_tree(&params, 3).unwrap();
///
/// assert_eq!(tree.node_count(), 10);
/// assert_eq!(tree.spot(0, 0), Some(100.0));
/// assert!(tree.value(3, 4).is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinomialTree {
    steps: usize,
    dt: f64,
    up: f64,
    down: f64,
    probability: f64,
    spots: Vec<f64>,
    values: Vec<f64>,
    early_exercise: Vec<bool>,
}

impl BinomialTree {
    pub(crate) fn build(lattice: &CrrLattice) -> Self {
        let steps = lattice.steps;
        let len = node_index(steps + 1, 0);
        let ratio = lattice.node_ratio();

        let mut spots = vec![0.0; len];
        for level in 0..=steps {
            let base = node_index(level, 0);
            let mut spot = lattice.lowest_spot(level);
            for slot in &mut spots[base..=base + level] {
                *slot = spot;
                spot *= ratio;
            }
        }

        let mut values = vec![0.0; len];
        let mut early_exercise = vec![false; len];
        let terminal = node_index(steps, 0);
        for node in 0..=steps {
            values[terminal + node] = lattice.intrinsic(spots[terminal + node]);
        }

        for level in (0..steps).rev() {
            let base = node_index(level, 0);
            let next = node_index(level + 1, 0);
            for node in 0..=level {
                let continuation =
                    lattice.continuation(values[next + node], values[next + node + 1]);
                let idx = base + node;
                values[idx] = continuation;
                if lattice.american {
                    let exercise = lattice.intrinsic(spots[idx]);
                    if exercise > continuation {
                        values[idx] = exercise;
                        early_exercise[idx] = true;
                    }
                }
            }
        }

        Self {
            steps,
            dt: lattice.dt,
            up: lattice.up,
            down: lattice.down,
            probability: lattice.probability,
            spots,
            values,
            early_exercise,
        }
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Length of one step in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Up factor `u`.
    #[inline]
    pub fn up_factor(&self) -> f64 {
        self.up
    }

    /// Down factor `d = 1/u`.
    #[inline]
    pub fn down_factor(&self) -> f64 {
        self.down
    }

    /// Risk-neutral up probability.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Total number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.values.len()
    }

    /// Option value at the root.
    #[inline]
    pub fn price(&self) -> f64 {
        self.values[0]
    }

    #[inline]
    fn index(&self, level: usize, node: usize) -> Option<usize> {
        (level <= self.steps && node <= level).then(|| node_index(level, node))
    }

    /// Underlying spot at a node.
    pub fn spot(&self, level: usize, node: usize) -> Option<f64> {
        self.index(level, node).map(|idx| self.spots[idx])
    }

    /// Option value at a node.
    pub fn value(&self, level: usize, node: usize) -> Option<f64> {
        self.index(level, node).map(|idx| self.values[idx])
    }

    /// Whether exercising at a node beats continuing.
    ///
    /// Always false for European options and at expiry.
    pub fn is_early_exercise(&self, level: usize, node: usize) -> Option<bool> {
        self.index(level, node).map(|idx| self.early_exercise[idx])
    }

    /// Option values on one level, lowest spot first.
    pub fn level_values(&self, level: usize) -> Option<&[f64]> {
        self.index(level, 0).map(|base| &self.values[base..=base + level])
    }

    /// Spots on one level, lowest first.
    pub fn level_spots(&self, level: usize) -> Option<&[f64]> {
        self.index(level, 0).map(|base| &self.spots[base..=base + level])
    }
}
