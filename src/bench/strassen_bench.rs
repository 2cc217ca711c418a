//! Criterion benchmarks: naive loops against sequential and parallel Strassen.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::{SeedableRng, distr::Uniform, prelude::Distribution, rngs::StdRng};

use strassen::{Strassen, StrassenConfig, matmul_naive_ikj};

fn random_matrix(n: usize, seed: u8) -> Vec<f64> {
    let mut rng = StdRng::from_seed([seed; 32]);
    let range = Uniform::new(-100.0, 100.0).unwrap();
    (0..n * n).map(|_| range.sample(&mut rng)).collect()
}

fn bench_multiply(c: &mut Criterion) {
    let sequential = Strassen::default();
    let parallel = Strassen::new(StrassenConfig::parallel(0));

    let mut group = c.benchmark_group("multiply");
    group.sample_size(10);
    for n in [128usize, 256, 512] {
        let a = random_matrix(n, 1);
        let b = random_matrix(n, 2);
        let mut out = vec![0.0; n * n];

        group.bench_with_input(BenchmarkId::new("naive_ikj", n), &n, |bench, &n| {
            bench.iter(|| matmul_naive_ikj(black_box(a.as_slice()), black_box(b.as_slice()), &mut out, n));
        });
        group.bench_with_input(BenchmarkId::new("strassen", n), &n, |bench, &n| {
            bench.iter(|| sequential.multiply_into(black_box(a.as_slice()), black_box(b.as_slice()), &mut out, n));
        });
        group.bench_with_input(BenchmarkId::new("strassen_mt", n), &n, |bench, &n| {
            bench.iter(|| parallel.multiply_into(black_box(a.as_slice()), black_box(b.as_slice()), &mut out, n));
        });
    }
    group.finish();
}

fn bench_threshold(c: &mut Criterion) {
    let n = 256;
    let a = random_matrix(n, 3);
    let b = random_matrix(n, 4);
    let mut out = vec![0.0; n * n];

    let mut group = c.benchmark_group("base_case_threshold");
    group.sample_size(10);
    for threshold in [8usize, 16, 32, 64, 128] {
        let engine = Strassen::new(StrassenConfig::with_threshold(threshold));
        group.bench_with_input(BenchmarkId::from_parameter(threshold), &threshold, |bench, _| {
            bench.iter(|| engine.multiply_into(black_box(a.as_slice()), black_box(b.as_slice()), &mut out, n));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_multiply, bench_threshold);
criterion_main!(benches);
