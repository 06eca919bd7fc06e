//! Cross-engine comparison tests.
//!
//! These tests check the lattice and Monte Carlo engines against the
//! closed-form Black-Scholes price.
//!
//! # Test Categories
//!
//! 1. **Lattice convergence**: CRR price approaches Black-Scholes
//! 2. **Monte Carlo consistency**: confidence interval coverage and seeding
//! 3. **Exercise style**: American premium over European
//! 4. **Properties**: parity and early-exercise bounds over random inputs

use approx::assert_relative_eq;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{ExerciseStyle, OptionParams, OptionType};
use pricer_pricing::analytical::BlackScholesEngine;
use pricer_pricing::engine::{ModelKind, PricingEngine, PricingModel};
use pricer_pricing::lattice::BinomialTreeEngine;
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
use proptest::prelude::*;

/// Standard test parameters: S = K = 100, T = 1, r = 5%, σ = 20%.
fn standard_params(option_type: OptionType) -> OptionParams {
    OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, option_type).unwrap()
}

fn seeded_mc(simulations: usize, seed: u64) -> MonteCarloEngine {
    MonteCarloEngine::new(
        MonteCarloConfig::builder()
            .simulations(simulations)
            .seed(seed)
            .build()
            .unwrap(),
    )
    .unwrap()
}

// ============================================================================
// Lattice Convergence
// ============================================================================

#[test]
fn test_binomial_1000_steps_within_one_cent() {
    let bs = BlackScholesEngine::new();
    let tree = BinomialTreeEngine::default();
    for option_type in [OptionType::Call, OptionType::Put] {
        let params = standard_params(option_type);
        let analytical = bs.price(&params).unwrap().price;
        let lattice = tree.price_with_steps(&params, 1000).unwrap().price;
        assert!(
            (lattice - analytical).abs() < 0.01,
            "{}: lattice={:.5}, analytical={:.5}",
            option_type,
            lattice,
            analytical
        );
    }
}

#[test]
fn test_binomial_error_shrinks_with_steps() {
    let params = standard_params(OptionType::Call);
    let analytical = BlackScholesEngine::new().price(&params).unwrap().price;
    let tree = BinomialTreeEngine::default();

    let errors: Vec<f64> = [25, 250, 2500]
        .iter()
        .map(|&steps| (tree.price_with_steps(&params, steps).unwrap().price - analytical).abs())
        .collect();
    assert!(errors[1] < errors[0]);
    assert!(errors[2] < errors[1]);
}

#[test]
fn test_binomial_european_parity_is_exact() {
    let tree = BinomialTreeEngine::default();
    let call = tree.price(&standard_params(OptionType::Call)).unwrap().price;
    let put = tree.price(&standard_params(OptionType::Put)).unwrap().price;
    assert_relative_eq!(call - put, 100.0 - 100.0 * (-0.05_f64).exp(), epsilon = 1e-9);
}

// ============================================================================
// Monte Carlo Consistency
// ============================================================================

#[test]
fn test_confidence_interval_coverage() {
    let params = standard_params(OptionType::Call);
    let analytical = BlackScholesEngine::new().price(&params).unwrap().price;
    let engine = MonteCarloEngine::default();

    let runs = 200;
    let covered = (0..runs)
        .filter(|&seed| {
            engine
                .price_with_simulations(&params, 2000, Some(seed))
                .unwrap()
                .confidence_interval
                .unwrap()
                .contains(analytical)
        })
        .count();

    let coverage = covered as f64 / runs as f64;
    assert!(
        (0.88..=1.0).contains(&coverage),
        "95% interval covered the analytical price in {:.1}% of runs",
        coverage * 100.0
    );
}

#[test]
fn test_mc_within_four_standard_errors() {
    let params = standard_params(OptionType::Put);
    let analytical = BlackScholes::from_params(&params).unwrap().price_put();
    let result = seeded_mc(200_000, 42).price(&params).unwrap();

    let tolerance = 4.0 * result.std_error.unwrap();
    assert!(
        (result.price - analytical).abs() < tolerance,
        "MC={:.4}, analytical={:.4}, tolerance={:.4}",
        result.price,
        analytical,
        tolerance
    );
}

#[test]
fn test_seeded_result_independent_of_thread_count() {
    let params = standard_params(OptionType::Call);
    let engine = seeded_mc(50_000, 2024);

    let parallel = engine.price(&params).unwrap();
    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| engine.price(&params).unwrap());

    assert_eq!(parallel, single);
}

#[test]
fn test_unseeded_runs_differ() {
    let params = standard_params(OptionType::Call);
    let engine = MonteCarloEngine::default();
    let a = engine.price(&params).unwrap().price;
    let b = engine.price(&params).unwrap().price;
    assert_ne!(a, b);
}

// ============================================================================
// Exercise Style
// ============================================================================

#[test]
fn test_american_put_dominates_european_across_strikes() {
    let tree = BinomialTreeEngine::default();
    for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
        let european = OptionParams::new(100.0, strike, 1.0, 0.05, 0.2, OptionType::Put).unwrap();
        let american = european.with_exercise(ExerciseStyle::American);
        let eu = tree.price(&european).unwrap().price;
        let am = tree.price(&american).unwrap().price;
        assert!(am >= eu, "K={}: american {} < european {}", strike, am, eu);
    }
}

#[test]
fn test_only_the_lattice_prices_american() {
    let american = standard_params(OptionType::Put).with_exercise(ExerciseStyle::American);
    for kind in ModelKind::ALL {
        let outcome = PricingModel::from_kind(kind).price(&american);
        match kind {
            ModelKind::BinomialTree => assert!(outcome.is_ok()),
            _ => assert!(outcome.unwrap_err().is_validation()),
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_american_at_least_european_and_intrinsic(
        spot in 50.0..150.0_f64,
        strike in 50.0..150.0_f64,
        expiry in 0.1..2.0_f64,
        rate in 0.0..0.1_f64,
        vol in 0.1..0.6_f64,
    ) {
        let tree = BinomialTreeEngine::default();
        let european = OptionParams::new(spot, strike, expiry, rate, vol, OptionType::Put).unwrap();
        let american = european.with_exercise(ExerciseStyle::American);

        let eu = tree.price_with_steps(&european, 200).unwrap().price;
        let am = tree.price_with_steps(&american, 200).unwrap().price;
        prop_assert!(am >= eu - 1e-12);
        prop_assert!(am >= european.intrinsic() - 1e-12);
    }

    #[test]
    fn prop_lattice_tracks_black_scholes(
        spot in 80.0..120.0_f64,
        strike in 80.0..120.0_f64,
        expiry in 0.25..2.0_f64,
        rate in 0.0..0.08_f64,
        vol in 0.15..0.5_f64,
    ) {
        let params = OptionParams::new(spot, strike, expiry, rate, vol, OptionType::Call).unwrap();
        let analytical = BlackScholes::from_params(&params).unwrap().price_call();
        let lattice = BinomialTreeEngine::default()
            .price_with_steps(&params, 500)
            .unwrap()
            .price;
        prop_assert!((lattice - analytical).abs() < 0.05);
    }
}
