//! Monte Carlo pricing under geometric Brownian motion.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloEngine
//! ├── MonteCarloConfig   (path count, cap, seed, Greeks flag)
//! ├── PricerRng          (one stream per chunk, derived from the seed)
//! ├── RunningStats       (Welford per chunk, merged in chunk order)
//! └── Greeks             (paired bump-and-revalue)
//! ```
//!
//! European payoffs depend only on the terminal spot, which GBM samples
//! exactly in one step. Full multi-step paths are available through
//! [`MonteCarloEngine::sample_paths`] for visualisation.
//!
//! # Examples
//!
//! ```rust
//! use pricer_models::instruments::{OptionParams, OptionType};
//! use pricer_pricing::engine::PricingEngine;
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
//!
//! let config = MonteCarloConfig::builder()
//!     .simulations(50_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let engine = MonteCarloEngine::new(config).unwrap();
//!
//! let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//! let result = engine.price(&params).unwrap();
//! println!("Price: {:.4} +/- {:.4}", result.price, result.confidence_95().unwrap());
//! ```

pub mod config;
pub mod paths;
pub mod pricer;

// Re-exports for convenient access
pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_SIMULATIONS, MAX_PATHS, MAX_SAMPLE_PATHS,
    MAX_STEPS,
};
pub use paths::{generate_gbm_paths, GbmParams, SimulatedPaths};
pub use pricer::{MonteCarloEngine, CHUNK_SIZE};
