//! Closed-form analytics for European options.
//!
//! This module provides:
//! - Black-Scholes pricing with analytical Greeks ([`BlackScholes`])
//! - Standard normal CDF/PDF ([`norm_cdf`], [`norm_pdf`])
//! - Implied volatility inversion ([`ImpliedVolatilitySolver`])
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the formulas themselves
//! - **Numerical Stability**: erfc-based CDF with exact reflection
//! - **No silent NaN**: degenerate σ√T is rejected at construction

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod implied_vol;

pub use black_scholes::{BlackScholes, Greeks, DAYS_PER_YEAR, PER_PERCENT};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied_vol::{ImpliedVolConfig, ImpliedVolatilitySolver};
