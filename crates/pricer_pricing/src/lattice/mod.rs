//! Cox-Ross-Rubinstein binomial lattice.
//!
//! - [`BinomialTreeEngine`]: European and American pricing by backward
//!   induction, with delta, gamma and theta taken from the tree
//! - [`BinomialTree`]: full node-by-node snapshot for inspection
//! - [`LatticeConfig`]: step bounds

mod binomial;
mod config;
mod tree;

pub use binomial::BinomialTreeEngine;
pub use config::{LatticeConfig, DEFAULT_TREE_STEPS, MAX_SNAPSHOT_STEPS, MAX_TREE_STEPS};
pub use tree::BinomialTree;
