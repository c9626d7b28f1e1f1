//! Insert / query / remove throughput across the filter variants.

use countbloom::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 100_000;

fn random_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen()).collect()
}

fn bench_add(c: &mut Criterion) {
    let keys = random_keys(CAPACITY, 1);
    let mut group = c.benchmark_group("add");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function(BenchmarkId::new("scbf", CAPACITY), |b| {
        b.iter(|| {
            let mut filter = SuccinctCountingBloomFilter::new(CAPACITY, 10).unwrap();
            for &key in &keys {
                filter.add(black_box(key)).unwrap();
            }
            filter
        });
    });

    group.bench_function(BenchmarkId::new("scbbf", CAPACITY), |b| {
        b.iter(|| {
            let mut filter = SuccinctCountingBlockedBloomFilter::new(CAPACITY, 16).unwrap();
            for &key in &keys {
                filter.add(black_box(key)).unwrap();
            }
            filter
        });
    });

    group.bench_function(BenchmarkId::new("cbf", CAPACITY), |b| {
        b.iter(|| {
            let mut filter = CountingBloomFilter::new(CAPACITY, 10).unwrap();
            for &key in &keys {
                filter.add(black_box(key)).unwrap();
            }
            filter
        });
    });

    group.finish();
}

fn bench_add_all(c: &mut Criterion) {
    let keys = random_keys(CAPACITY, 2);
    let mut group = c.benchmark_group("add_all");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function(BenchmarkId::new("scbf_staged", CAPACITY), |b| {
        b.iter(|| {
            let mut filter = SuccinctCountingBloomFilter::new(CAPACITY, 10).unwrap();
            filter.add_all(black_box(&keys)).unwrap();
            filter
        });
    });

    group.bench_function(BenchmarkId::new("cbf_staged", CAPACITY), |b| {
        b.iter(|| {
            let mut filter = CountingBloomFilter::new(CAPACITY, 10).unwrap();
            filter.add_all(black_box(&keys)).unwrap();
            filter
        });
    });

    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let keys = random_keys(CAPACITY, 3);
    let misses = random_keys(CAPACITY, 4);

    let mut scbf = SuccinctCountingBloomFilter::new(CAPACITY, 10).unwrap();
    let mut scbbf = SuccinctCountingBlockedBloomFilter::new(CAPACITY, 16).unwrap();
    let mut cbf = CountingBloomFilter::new(CAPACITY, 10).unwrap();
    for &key in &keys {
        scbf.add(key).unwrap();
        scbbf.add(key).unwrap();
        cbf.add(key).unwrap();
    }

    let mut group = c.benchmark_group("contains");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("scbf_hit", |b| {
        b.iter(|| keys.iter().filter(|&&k| scbf.contains(black_box(k))).count());
    });
    group.bench_function("scbf_miss", |b| {
        b.iter(|| misses.iter().filter(|&&k| scbf.contains(black_box(k))).count());
    });
    group.bench_function("scbbf_hit", |b| {
        b.iter(|| keys.iter().filter(|&&k| scbbf.contains(black_box(k))).count());
    });
    group.bench_function("scbbf_miss", |b| {
        b.iter(|| misses.iter().filter(|&&k| scbbf.contains(black_box(k))).count());
    });
    group.bench_function("cbf_hit", |b| {
        b.iter(|| keys.iter().filter(|&&k| cbf.contains(black_box(k))).count());
    });

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let keys = random_keys(CAPACITY, 5);
    let mut group = c.benchmark_group("remove");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("scbf", |b| {
        b.iter_batched(
            || {
                let mut filter = SuccinctCountingBloomFilter::new(CAPACITY, 10).unwrap();
                filter.add_all(&keys).unwrap();
                filter
            },
            |mut filter| {
                for &key in &keys {
                    filter.remove(black_box(key));
                }
                filter
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_add, bench_add_all, bench_contains, bench_remove);
criterion_main!(benches);
