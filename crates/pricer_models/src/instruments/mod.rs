//! Vanilla option definitions.
//!
//! This module provides the validated inputs shared by every pricing
//! engine:
//!
//! - [`OptionParams`]: spot, strike, expiry, rate, volatility, type and exercise
//! - [`QuoteParams`]: the same without volatility, for implied volatility
//! - [`OptionType`]: call/put with exact intrinsic payoff
//! - [`ExerciseStyle`]: European or American
//! - [`ParamField`]: names a single numeric input for sweeps
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{OptionParams, OptionType};
//!
//! let params = OptionParams::new(110.0, 100.0, 0.5, 0.03, 0.25, OptionType::Call).unwrap();
//! assert_eq!(params.intrinsic(), 10.0);
//! ```

mod error;
mod exercise;
mod params;
mod payoff;

pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use params::{OptionParams, ParamField, QuoteParams};
pub use payoff::OptionType;
