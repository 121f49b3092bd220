//! Throughput benchmarks against `std::collections::BinaryHeap`.
//!
//! The std heap has no decrease-key, so the decrease-key workload is
//! benchmarked only for `FibonacciHeap`; the push/pop workloads compare
//! both.
//!
//! ```bash
//! cargo bench --bench heap_perf
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fibarena::FibonacciHeap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hint::black_box;

fn random_keys(n: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|_| rng.gen()).collect()
}

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_then_pop_all");
    for &n in &[1_000usize, 10_000, 100_000] {
        let keys = random_keys(n);

        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new();
                for &k in keys {
                    heap.insert(k);
                }
                while let Ok(k) = heap.pop_min() {
                    black_box(k);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("std_binary", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = BinaryHeap::new();
                for &k in keys {
                    heap.push(Reverse(k));
                }
                while let Some(Reverse(k)) = heap.pop() {
                    black_box(k);
                }
            })
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key_heavy");
    for &n in &[1_000usize, 10_000] {
        group.bench_function(BenchmarkId::new("fibonacci", n), |b| {
            b.iter(|| {
                let mut heap = FibonacciHeap::new();
                let handles: Vec<_> = (0..n as u64).map(|k| heap.insert(k + n as u64)).collect();
                // One pop forces consolidation so the decreases hit deep
                // nodes and exercise cascading cuts.
                heap.pop_min().ok();
                for (i, &h) in handles.iter().enumerate().skip(1) {
                    heap.decrease_key(h, i as u64).ok();
                }
                while let Ok(k) = heap.pop_min() {
                    black_box(k);
                }
            })
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for &n in &[1_000usize, 10_000] {
        let keys = random_keys(n);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter(|| {
                let mut a: FibonacciHeap<u64> = keys[..n / 2].iter().copied().collect();
                let mut b2: FibonacciHeap<u64> = keys[n / 2..].iter().copied().collect();
                a.merge(&mut b2);
                black_box(a.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_push_pop, bench_decrease_key, bench_merge);
criterion_main!(benches);
