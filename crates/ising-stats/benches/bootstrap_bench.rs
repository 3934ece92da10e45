//! Benchmarks for ground-state estimation and the bootstrap
//!
//! Run with: cargo bench -p ising-stats

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ising_stats::{BootstrapVerifier, estimate_ground_state};

fn sample(n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..n)
        .map(|_| {
            let u: f64 = rng.r#gen();
            -100.0 + 50.0 * u.powi(3)
        })
        .collect()
}

/// Benchmark the closed-form estimator
fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");

    for n in &[100, 1_000, 10_000] {
        let energies = sample(*n);
        group.bench_with_input(BenchmarkId::new("reads", n), &energies, |b, e| {
            b.iter(|| estimate_ground_state(black_box(e), black_box(0.19)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the full bootstrap, sequential and on the rayon pool
fn bench_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap");
    group.sample_size(20);

    let energies = sample(1_000);
    for parallel in [false, true] {
        let verifier = BootstrapVerifier::new(0.19, 1_000)
            .unwrap()
            .parallel(parallel);
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                verifier.verify(black_box(&energies), &mut rng).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_estimate, bench_bootstrap);
criterion_main!(benches);
