//! Criterion benchmarks for u-ising.
//!
//! Uses periodic square lattices with random couplings to measure sweep
//! throughput independent of any particular application.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use std::collections::BTreeMap;
use u_ising::anneal::{BetaSchedule, ClampedAnnealer};
use u_ising::coloring::greedy_coloring;
use u_ising::model::{Biases, Clamped, Couplings, IsingModel};
use u_ising::random::create_rng;
use u_ising::sampler::{Sampler, SamplerConfig};

// ===========================================================================
// Random-coupling torus: spin (r, c) coupled to (r+1, c) and (r, c+1)
// ===========================================================================

fn torus(side: usize, seed: u64) -> IsingModel {
    let mut rng = create_rng(seed);
    let id = |r: usize, c: usize| (r % side) * side + (c % side);

    let h: Biases = (0..side * side)
        .map(|i| (i, rng.random_range(-0.5..0.5)))
        .collect();
    let mut j = Couplings::new();
    for r in 0..side {
        for c in 0..side {
            for other in [id(r + 1, c), id(r, c + 1)] {
                let a = id(r, c);
                let key = (a.min(other), a.max(other));
                j.entry(key).or_insert_with(|| rng.random_range(-1.0..1.0));
            }
        }
    }
    IsingModel::new(h, j).expect("torus model is valid")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_coloring(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_coloring");

    for side in [8usize, 32, 64] {
        let adjacency = torus(side, 1).adjacency();
        group.bench_with_input(BenchmarkId::from_parameter(side), &adjacency, |b, adj| {
            b.iter(|| black_box(greedy_coloring(black_box(adj)).unwrap()))
        });
    }
    group.finish();
}

fn bench_anneal(c: &mut Criterion) {
    let mut group = c.benchmark_group("clamped_anneal");
    group.sample_size(10);

    for side in [8usize, 16, 32] {
        let model = torus(side, 7);
        // Clamp the first row.
        let clamped: Clamped = (0..side).map(|i| (i, 1)).collect();
        let annealer = ClampedAnnealer::new(&model, &clamped).unwrap();
        let betas = BetaSchedule::Linear {
            start: 0.1,
            end: 3.0,
            sweeps: 200,
        }
        .betas()
        .unwrap();

        group.bench_with_input(
            BenchmarkId::new("s200", format!("{side}x{side}")),
            &(annealer, betas),
            |b, (annealer, betas)| {
                let mut rng = create_rng(42);
                b.iter(|| black_box(annealer.anneal(black_box(betas), &mut rng).unwrap()))
            },
        );
    }
    group.finish();
}

fn bench_sampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler");
    group.sample_size(10);

    let model = torus(12, 3);
    let config = SamplerConfig::default().with_num_reads(32);
    let clamped = BTreeMap::new();
    for parallel in [false, true] {
        let config = config.clone().with_parallel(parallel);
        group.bench_with_input(
            BenchmarkId::new("reads32", if parallel { "parallel" } else { "sequential" }),
            &config,
            |b, cfg| b.iter(|| black_box(Sampler::sample(&model, &clamped, cfg).unwrap())),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_coloring, bench_anneal, bench_sampler);
criterion_main!(benches);
