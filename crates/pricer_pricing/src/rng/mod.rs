//! # Random Number Generation
//!
//! Every Monte Carlo call builds its own generators from an explicit seed.
//! There is no global stream: parallel chunks draw from
//! [`PricerRng::for_stream`], keyed by chunk index, so a seeded run is
//! reproducible whatever the thread count.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::for_stream(12345, 0);
//! let z = rng.gen_normal();
//! assert!(z.is_finite());
//! ```

mod prng;

pub use prng::{derive_seed, PricerRng};
