//! Criterion benchmarks for the pricing engines.
//!
//! Benchmarks cover:
//! - RNG performance (single draws and batch fills)
//! - Black-Scholes price and Greeks
//! - Binomial lattice with varying step counts, European and American
//! - Monte Carlo pricing with varying path counts, with and without Greeks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::instruments::{ExerciseStyle, OptionParams, OptionType};
use pricer_pricing::analytical::BlackScholesEngine;
use pricer_pricing::engine::PricingEngine;
use pricer_pricing::lattice::BinomialTreeEngine;
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
use pricer_pricing::rng::PricerRng;

fn atm_params(option_type: OptionType) -> OptionParams {
    OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, option_type).unwrap()
}

/// Benchmark RNG generation (foundation for MC simulations).
fn bench_rng_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = PricerRng::from_seed(42);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the closed-form engine.
fn bench_black_scholes(c: &mut Criterion) {
    let engine = BlackScholesEngine::new();
    let params = atm_params(OptionType::Call);

    c.bench_function("black_scholes_price_and_greeks", |b| {
        b.iter(|| engine.price(black_box(&params)))
    });
}

/// Benchmark the lattice with varying depth.
fn bench_binomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial_tree");
    let engine = BinomialTreeEngine::default();
    let european = atm_params(OptionType::Put);
    let american = european.with_exercise(ExerciseStyle::American);

    for steps in [100, 500, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::new("european_put", steps), &steps, |b, &n| {
            b.iter(|| engine.price_with_steps(black_box(&european), n))
        });
        group.bench_with_input(BenchmarkId::new("american_put", steps), &steps, |b, &n| {
            b.iter(|| engine.price_with_steps(black_box(&american), n))
        });
    }

    group.finish();
}

/// Benchmark Monte Carlo pricing with varying path counts.
fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    group.sample_size(30); // Reduce sample size for slower benchmarks
    let params = atm_params(OptionType::Call);

    for n_paths in [10_000, 100_000, 1_000_000] {
        group.bench_with_input(
            BenchmarkId::new("european_call", n_paths),
            &n_paths,
            |b, &n| {
                let engine = MonteCarloEngine::new(
                    MonteCarloConfig::builder().simulations(n).seed(42).build().unwrap(),
                )
                .unwrap();
                b.iter(|| engine.price(black_box(&params)))
            },
        );
    }

    group.bench_function("european_call_with_greeks_100k", |b| {
        let engine = MonteCarloEngine::new(
            MonteCarloConfig::builder()
                .simulations(100_000)
                .seed(42)
                .greeks(true)
                .build()
                .unwrap(),
        )
        .unwrap();
        b.iter(|| engine.price(black_box(&params)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rng_generation,
    bench_black_scholes,
    bench_binomial,
    bench_monte_carlo
);
criterion_main!(benches);
