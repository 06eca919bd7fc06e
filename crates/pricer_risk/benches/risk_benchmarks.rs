//! Criterion benchmarks for pricer_risk analytics.
//!
//! Benchmarks cover:
//! - Sensitivity sweeps with varying grid sizes and engines
//! - Three-model comparison
//! - Payoff diagrams over dense spot grids

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::instruments::{OptionParams, OptionType, ParamField};
use pricer_pricing::analytical::BlackScholesEngine;
use pricer_pricing::lattice::BinomialTreeEngine;
use pricer_risk::comparison::ModelComparator;
use pricer_risk::payoff::{OptionLeg, PayoffAnalyzer, Position, SpotRange};
use pricer_risk::sensitivity::{SensitivityAnalyzer, SweepRange};

fn atm_call() -> OptionParams {
    OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap()
}

/// Benchmark spot sweeps with the closed-form and lattice engines.
fn bench_sensitivity_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensitivity_sweep");
    let params = atm_call();
    let closed_form = SensitivityAnalyzer::new(BlackScholesEngine::new());
    let lattice = SensitivityAnalyzer::new(BinomialTreeEngine::default());

    for points in [50, 500, 5_000] {
        let range = SweepRange::new(0.2, points).unwrap();
        group.bench_with_input(BenchmarkId::new("black_scholes", points), &range, |b, range| {
            b.iter(|| closed_form.sweep_range(black_box(&params), ParamField::Spot, range))
        });
        group.bench_with_input(BenchmarkId::new("binomial_100", points), &range, |b, range| {
            b.iter(|| lattice.sweep_range(black_box(&params), ParamField::Spot, range))
        });
    }

    group.finish();
}

/// Benchmark the default three-model comparison.
fn bench_comparison(c: &mut Criterion) {
    let comparator = ModelComparator::default();
    let params = atm_call();

    c.bench_function("compare_default_models", |b| {
        b.iter(|| comparator.compare(black_box(&params)))
    });
}

/// Benchmark an iron condor diagram over increasingly dense grids.
fn bench_payoff_diagram(c: &mut Criterion) {
    let mut group = c.benchmark_group("payoff_diagram");
    let condor = Position::new(vec![
        OptionLeg::long(OptionType::Put, 85.0, 0.8),
        OptionLeg::short(OptionType::Put, 95.0, 2.4),
        OptionLeg::short(OptionType::Call, 105.0, 2.6),
        OptionLeg::long(OptionType::Call, 115.0, 0.9),
    ])
    .unwrap();

    for points in [100, 10_000, 100_000] {
        let spots = SpotRange::around_strikes(&condor, 0.3, points).unwrap().spots();
        group.bench_with_input(BenchmarkId::new("iron_condor", points), &spots, |b, spots| {
            b.iter(|| PayoffAnalyzer::payoff_diagram(&condor, black_box(spots)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sensitivity_sweep,
    bench_comparison,
    bench_payoff_diagram
);
criterion_main!(benches);
