//! Container operation benchmarks
//!
//! Benchmarks the three primitives under measurement at several list sizes:
//! - Member (hit and miss)
//! - Guarded insert + delete of one value
//! - Population step
//!
//! Toyota Way: Measure before optimizing (Genchi Genbutsu)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use listbench::list::LinkedList;
use listbench::workload::populate;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Populated list of `n` unique values with a fixed seed
fn populated(n: usize) -> LinkedList {
    let mut rng = StdRng::seed_from_u64(7);
    let mut list = LinkedList::new();
    populate(&mut list, n, &mut rng).unwrap();
    list
}

/// Benchmark membership tests that miss (full scan)
fn bench_member_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("member_miss");

    for size in [100, 1_000, 10_000].iter() {
        let list = populated(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            // Outside the value domain, never present
            b.iter(|| black_box(list.member(black_box(-1))));
        });
    }

    group.finish();
}

/// Benchmark membership tests that hit the tail (worst-case hit)
fn bench_member_hit_tail(c: &mut Criterion) {
    let mut group = c.benchmark_group("member_hit_tail");

    for size in [100, 1_000, 10_000].iter() {
        let list = populated(*size);
        let tail = list.iter().last().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(list.member(black_box(tail))));
        });
    }

    group.finish();
}

/// Benchmark insert at head followed by delete of the head
fn bench_insert_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_delete");

    for size in [100, 1_000, 10_000].iter() {
        let mut list = populated(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                list.insert(black_box(-1));
                black_box(list.delete(-1));
            });
        });
    }

    group.finish();
}

/// Benchmark the population step
fn bench_populate(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate");

    for size in [100, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &n| {
            b.iter(|| black_box(populated(n)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_member_miss,
    bench_member_hit_tail,
    bench_insert_delete,
    bench_populate
);
criterion_main!(benches);
