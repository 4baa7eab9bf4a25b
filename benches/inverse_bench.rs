//! Benchmarks for dense matrix inversion and multiplication.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use parmat::{parallel_inverse, parallel_mm, DenseMatrix, ParallelConfig};

/// Builds a diagonally dominant matrix that the no-pivoting elimination
/// always accepts.
fn dominant_matrix(n: usize) -> DenseMatrix {
    let mut m = DenseMatrix::square(n);
    for i in 0..n {
        for j in 0..n {
            m[(i, j)] = ((i * 31 + j * 17) % 19) as f64 - 9.0;
        }
        m[(i, i)] = 10.0 * n as f64;
    }
    m
}

fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");

    for size in [16, 64, 128, 256] {
        let m = dominant_matrix(size);
        let config = ParallelConfig {
            parallel_threshold: 1,
            ..ParallelConfig::default()
        };

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, _| {
            b.iter(|| black_box(m.inverse().unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, _| {
            b.iter(|| black_box(parallel_inverse(&m, &config).unwrap()));
        });
    }

    group.finish();
}

fn bench_mm(c: &mut Criterion) {
    let mut group = c.benchmark_group("mm");

    for size in [16, 64, 128] {
        let a = dominant_matrix(size);
        let b_mat = dominant_matrix(size);

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, _| {
            b.iter(|| black_box(a.mm(&b_mat).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, _| {
            b.iter(|| black_box(parallel_mm(&a, &b_mat).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_inverse, bench_mm);
criterion_main!(benches);
