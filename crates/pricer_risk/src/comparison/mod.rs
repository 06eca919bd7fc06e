//! Cross-model comparison.
//!
//! [`ModelComparator`] prices one parameter snapshot with the closed-form,
//! lattice and Monte Carlo engines. Models that cannot price the input
//! appear as [`ModelOutcome::Rejected`] rather than being dropped.

mod comparator;
mod outcome;

pub use comparator::{ComparatorConfig, ModelComparator, DEFAULT_COMPARISON_SEED};
pub use outcome::{ComparisonResult, ModelOutcome};
