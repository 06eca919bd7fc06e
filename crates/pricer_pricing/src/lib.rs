//! # Pricer Engine (Layer 3: Pricing Engines)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns validated option parameters from Layer 2 into
//! prices and Greeks through three interchangeable engines:
//! - [`analytical::BlackScholesEngine`]: closed-form European pricing
//! - [`lattice::BinomialTreeEngine`]: CRR lattice, European and American
//! - [`mc::MonteCarloEngine`]: parallel GBM simulation with confidence intervals
//!
//! All three implement [`engine::PricingEngine`] and return a
//! [`greeks::PricingResult`] whose Greeks are in quoted units (vega and rho
//! per 1%, theta per calendar day).
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::instruments::{OptionParams, OptionType};
//! use pricer_pricing::engine::{ModelKind, PricingEngine, PricingModel};
//!
//! let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//!
//! for kind in ModelKind::ALL {
//!     let result = PricingModel::from_kind(kind).price(&params).unwrap();
//!     assert!((result.price - 10.45).abs() < 1.0);
//! }
//! ```
//!
//! ## Concurrency
//!
//! Engines hold immutable configuration only. Monte Carlo parallelises over
//! path chunks with rayon and threads its own seeded generators through the
//! simulation; no random state is shared between calls.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Allow unknown lints for clippy compatibility across versions
#![allow(unknown_lints)]

// Closed-form engine
pub mod analytical;

// Shared engine interface
pub mod engine;

// Engine configuration errors
pub mod error;

// Pricing result types
pub mod greeks;

// Binomial lattice
pub mod lattice;

// Monte Carlo simulation
pub mod mc;

// Random number generation
pub mod rng;

pub use engine::{ModelKind, PricingEngine, PricingModel};
pub use error::ConfigError;
pub use greeks::{Greek, GreeksResult, PricingResult};
