//! # Pricer Risk (L4: Application)
//!
//! Analytics built on the Layer 3 engines.
//!
//! This crate provides:
//! - One-factor sensitivity sweeps with any
//!   [`PricingEngine`](pricer_pricing::engine::PricingEngine)
//! - Side-by-side comparison of the closed-form, lattice and Monte Carlo models
//! - Expiry payoff and profit/loss diagrams for multi-leg positions
//! - Rayon-based parallel mapping with deterministic ordering
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  sensitivity/ - SweepRange, Analyzer    │
//! │  comparison/  - ModelComparator         │
//! │  payoff/      - Position, diagrams      │
//! │  parallel/    - Rayon utilities         │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  Black-Scholes, CRR lattice, MC engines │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{OptionParams, OptionType, ParamField};
//! use pricer_pricing::engine::PricingModel;
//! use pricer_risk::comparison::ModelComparator;
//! use pricer_risk::sensitivity::{SensitivityAnalyzer, SweepRange};
//!
//! let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//!
//! let comparison = ModelComparator::default().compare(&params).unwrap();
//! assert_eq!(comparison.priced().count(), 3);
//!
//! let grid = SensitivityAnalyzer::new(PricingModel::black_scholes())
//!     .sweep_range(&params, ParamField::Spot, &SweepRange::default())
//!     .unwrap();
//! assert_eq!(grid.len(), 50);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod comparison;
pub mod parallel;
pub mod payoff;
pub mod sensitivity;

// Re-export commonly used types
pub use comparison::{ComparatorConfig, ComparisonResult, ModelComparator, ModelOutcome};
pub use payoff::{OptionLeg, PayoffAnalyzer, PayoffPoint, Position, PositionError, Side, SpotRange};
pub use sensitivity::{SensitivityAnalyzer, SensitivityGrid, SensitivityPoint, SweepRange};
