//! Criterion benchmarks for the hybrid placement engine.
//!
//! Uses seeded synthetic instances (Euclidean latency costs) at the sizes
//! the engine is typically run on.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cloudlet_hga::hybrid::{HgaConfig, HgaRunner};
use cloudlet_hga::model::InstanceGenerator;
use cloudlet_hga::random::create_rng;
use cloudlet_hga::sa::{SaRefiner, SaSchedule};
use cloudlet_hga::solution::Solution;

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_hga_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("hga_placement");
    group.sample_size(10);

    for (cloudlets, sites) in [(50usize, 10usize), (100, 20), (200, 30)] {
        let problem = InstanceGenerator::new(cloudlets, sites)
            .generate()
            .expect("benchmark instance");
        let config = HgaConfig::default()
            .with_population_size(50)
            .with_max_generations(30)
            .with_stagnation_limit(30)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("c{}_s{}", cloudlets, sites), cloudlets),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = HgaRunner::run(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_sa_refine(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa_refine");
    group.sample_size(10);

    for &steps in &[20usize, 100, 500] {
        let problem = InstanceGenerator::new(100, 20)
            .generate()
            .expect("benchmark instance");
        let start = Solution::random(&problem, &mut create_rng(7));
        let schedule = SaSchedule::default().with_steps_per_call(steps);
        group.bench_with_input(
            BenchmarkId::from_parameter(steps),
            &(problem, start, schedule),
            |b, (p, s, sch)| {
                b.iter(|| {
                    let mut rng = create_rng(42);
                    let result = SaRefiner::refine(black_box(s), black_box(p), sch, &mut rng);
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_hga_placement, bench_sa_refine);
criterion_main!(benches);
