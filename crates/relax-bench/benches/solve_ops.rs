//! Criterion benchmarks for whole distributed solves.
//!
//! Each solve runs a fixed number of sweeps so process counts are compared
//! on equal work; the numbers include thread start-up and the final gather.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use relax_bench::{fixed_sweeps, reference_profile};
use relax_core::RunControl;
use relax_solver::{solve_parallel, Method};

const SWEEPS: u64 = 50;

fn bench_solve(c: &mut Criterion, method: Method, name: &str) {
    let grid = reference_profile().unwrap();
    let config = fixed_sweeps(method, SWEEPS);
    let mut group = c.benchmark_group(name);
    for processes in [1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(processes), &processes, |b, &p| {
            b.iter(|| solve_parallel(p, &grid, &config, &RunControl::new()).unwrap());
        });
    }
    group.finish();
}

/// Benchmark: 50 Jacobi sweeps of the reference plate on 1-8 ranks.
fn bench_jacobi_solve(c: &mut Criterion) {
    bench_solve(c, Method::Jacobi, "jacobi_solve_200x50");
}

/// Benchmark: 50 synchronized Gauss-Seidel sweeps on 1-8 ranks.
fn bench_seidel_solve(c: &mut Criterion) {
    bench_solve(c, Method::GaussSeidel, "seidel_solve_200x50");
}

criterion_group!(benches, bench_jacobi_solve, bench_seidel_solve);
criterion_main!(benches);
