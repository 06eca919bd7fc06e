//! Pricing results and Greek selection.
//!
//! - [`PricingResult`]: price plus optional Greeks, standard error and interval
//! - [`GreeksResult`]: per-Greek `Option<f64>` in quoted units
//! - [`Greek`]: names a single sensitivity

mod result;

pub use result::{ConfidenceInterval, Greek, GreeksResult, PricingResult, Z_95, Z_99};
