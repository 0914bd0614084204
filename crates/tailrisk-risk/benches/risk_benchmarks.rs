//! Benchmarks for the tailrisk-risk pipeline.
//!
//! Run with: cargo bench -p tailrisk-risk

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tailrisk_core::{ConfidenceLevel, Date, PriceSeries, TimeSeries};
use tailrisk_risk::{historical_var_cvar, QuantileMethod, ReturnSeriesBuilder, RiskReport};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Deterministic zig-zag price path, roughly seven years of trading days at 1750.
fn create_prices(n: usize) -> PriceSeries {
    let start = Date::from_ymd(2018, 1, 1).unwrap();
    let mut price = 100.0;
    PriceSeries::from_pairs((0..n).map(|i| {
        let shock = ((i * 7919) % 200) as f64 / 10_000.0 - 0.0095;
        price *= 1.0 + shock;
        (start.add_days(i as i64), price)
    }))
    .unwrap()
}

fn bench_returns(c: &mut Criterion) {
    let mut group = c.benchmark_group("returns");

    for size in [250usize, 1750, 10_000] {
        let prices = create_prices(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &prices, |b, prices| {
            b.iter(|| ReturnSeriesBuilder::build(black_box(prices)))
        });
    }
    group.finish();
}

fn bench_var_cvar(c: &mut Criterion) {
    let mut group = c.benchmark_group("var_cvar");
    let alpha = ConfidenceLevel::from_percent(5).unwrap();

    for size in [250usize, 1750, 10_000] {
        let returns = ReturnSeriesBuilder::build(&create_prices(size)).unwrap().values();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("truncate", size), &returns, |b, r| {
            b.iter(|| historical_var_cvar(black_box(r), alpha, QuantileMethod::Truncate))
        });
        group.bench_with_input(BenchmarkId::new("linear", size), &returns, |b, r| {
            b.iter(|| historical_var_cvar(black_box(r), alpha, QuantileMethod::Linear))
        });
    }
    group.finish();
}

fn bench_full_report(c: &mut Criterion) {
    let prices = create_prices(1750);
    let alpha = ConfidenceLevel::from_percent(5).unwrap();

    c.bench_function("risk_report_1750", |b| {
        b.iter(|| RiskReport::compute(black_box(&prices), alpha, QuantileMethod::Truncate))
    });
}

criterion_group!(benches, bench_returns, bench_var_cvar, bench_full_report);
criterion_main!(benches);
