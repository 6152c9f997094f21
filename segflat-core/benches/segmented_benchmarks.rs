//! Benchmarks comparing sequential and parallel execution of the segmented primitives

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use segflat_core::{
    expand, primes, segmented_reduce, segmented_scan, Engine, EngineConfig, Sum,
};
use std::hint::black_box;

/// Flags with a segment start every `period` elements
fn generate_segments(len: usize, period: usize) -> (Vec<bool>, Vec<i64>) {
    let flags = (0..len).map(|i| i % period == 0).collect();
    let values = (0..len).map(|i| (i % 97) as i64).collect();
    (flags, values)
}

fn engines() -> Vec<(&'static str, Engine)> {
    vec![
        ("sequential", Engine::sequential()),
        (
            "parallel",
            Engine::new(EngineConfig::parallel()).expect("parallel engine"),
        ),
    ]
}

fn benchmark_segmented_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmented_scan");

    for size in [10_000usize, 100_000, 1_000_000].iter() {
        let (flags, values) = generate_segments(*size, 37);

        for (name, engine) in engines() {
            group.bench_with_input(BenchmarkId::new(name, size), size, |b, _| {
                b.iter(|| {
                    segmented_scan(&engine, &Sum::<i64>::new(), black_box(&flags), &values)
                })
            });
        }
    }

    group.finish();
}

fn benchmark_segmented_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmented_reduce");
    let (flags, values) = generate_segments(1_000_000, 101);

    for (name, engine) in engines() {
        group.bench_function(name, |b| {
            b.iter(|| segmented_reduce(&engine, &Sum::<i64>::new(), black_box(&flags), &values))
        });
    }

    group.finish();
}

fn benchmark_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");
    let sizes: Vec<usize> = (0..50_000).map(|i| i % 40).collect();

    for (name, engine) in engines() {
        group.bench_function(name, |b| {
            b.iter(|| expand(&engine, |&n: &usize| n, |&n, j| n * j, black_box(&sizes)))
        });
    }

    group.finish();
}

fn benchmark_sieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("sieve");
    group.sample_size(10);

    for limit in [10_000i64, 1_000_000].iter() {
        for (name, engine) in engines() {
            group.bench_with_input(BenchmarkId::new(name, limit), limit, |b, &limit| {
                b.iter(|| primes(&engine, black_box(limit)))
            });
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_segmented_scan,
    benchmark_segmented_reduce,
    benchmark_expand,
    benchmark_sieve
);
criterion_main!(benches);
