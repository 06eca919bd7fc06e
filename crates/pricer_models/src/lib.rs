//! # Pricer Models (L2: Business Logic)
//!
//! Vanilla option definitions and closed-form analytics.
//!
//! This crate provides:
//! - Validated option parameters (`instruments::OptionParams`)
//! - Call/put payoffs and exercise styles
//! - Black-Scholes pricing with analytical Greeks
//! - Implied volatility inversion with a bisection safeguard
//!
//! ## Design Principles
//!
//! - **Validate at construction**: invalid inputs never reach a pricer
//! - **Generic analytics** over `T: Float` so the formulas work for `f32`/`f64`
//! - **Immutable values**: parameter updates return new instances

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
