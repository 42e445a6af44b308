//! Benchmarks for the laminate solver

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use laminate_solver::prelude::*;
use std::sync::Arc;

fn quasi_isotropic(repeats: usize) -> Vec<f64> {
    [0.0, 45.0, -45.0, 90.0]
        .iter()
        .copied()
        .cycle()
        .take(4 * repeats)
        .collect()
}

fn benchmark_construction(c: &mut Criterion) {
    let material = Arc::new(MaterialProperties::t300_5208());
    let angles = quasi_isotropic(5);

    c.bench_function("laminate_20ply_construct", |b| {
        b.iter(|| {
            let lam = Laminate::uniform(black_box(&angles), 0.005, material.clone()).unwrap();
            black_box(lam);
        })
    });
}

fn benchmark_solve(c: &mut Criterion) {
    let material = Arc::new(MaterialProperties::t300_5208());
    let lam = Laminate::uniform(&quasi_isotropic(5), 0.005, material).unwrap();
    let load = LoadState::new([6251.9936, 0.0, 2500.176], [10.0, 0.0, 0.0]);

    c.bench_function("laminate_20ply_solve", |b| {
        b.iter(|| black_box(lam.solve(black_box(&load)).unwrap()))
    });

    c.bench_function("laminate_20ply_analyze", |b| {
        b.iter(|| black_box(lam.analyze(&load, &SolverOptions::default()).unwrap()))
    });
}

fn benchmark_load_cases(c: &mut Criterion) {
    let material = Arc::new(MaterialProperties::t300_5208());
    let lam = Laminate::uniform(&quasi_isotropic(10), 0.005, material).unwrap();
    let loads: Vec<LoadState> = (0..1000)
        .map(|i| LoadState::in_plane(i as f64, 0.5 * i as f64, 10.0))
        .collect();

    c.bench_function("load_cases_1000", |b| {
        b.iter(|| black_box(solve_load_cases(&lam, &loads, &SolverOptions::default())))
    });
}

criterion_group!(
    benches,
    benchmark_construction,
    benchmark_solve,
    benchmark_load_cases,
);

criterion_main!(benches);
