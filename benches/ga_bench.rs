//! Criterion benchmarks for the TSP GA.
//!
//! Uses a synthetic ring instance so timings measure operator overhead
//! rather than instance structure.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_tsp::ga::operators::{pmx_crossover, random_cut_points, swap_mutation};
use u_tsp::ga::{GaConfig, GaRunner, NoProgress, Tour, Tournament};
use u_tsp::matrix::DistanceMatrix;
use u_tsp::random::create_rng;

fn ring(n: usize) -> DistanceMatrix {
    let rows = (0..n)
        .map(|i| {
            (0..=i)
                .map(|j| {
                    let d = i - j;
                    (d.min(n - d) * 10) as u64
                })
                .collect()
        })
        .collect();
    DistanceMatrix::from_lower_triangular(rows).expect("ring rows are triangular")
}

fn bench_tour_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("tour_length");
    for n in [52, 200, 1000] {
        let matrix = ring(n);
        let tour = Tour::random(n, &mut create_rng(1));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(matrix.tour_length(black_box(tour.nodes()))))
        });
    }
    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let mut rng = create_rng(2);
    let p1 = Tour::random(200, &mut rng).into_nodes();
    let p2 = Tour::random(200, &mut rng).into_nodes();

    c.bench_function("pmx_crossover_200", |b| {
        b.iter(|| {
            let (a, z) = random_cut_points(200, &mut rng).expect("n >= 2");
            black_box(pmx_crossover(&p1, &p2, a, z))
        })
    });

    let mut perm = p1.clone();
    c.bench_function("swap_mutation_200", |b| {
        b.iter(|| swap_mutation(black_box(&mut perm), &mut rng))
    });
}

fn bench_selection(c: &mut Criterion) {
    let matrix = ring(52);
    let mut rng = create_rng(3);
    let population: Vec<Tour> = (0..100).map(|_| Tour::random(52, &mut rng)).collect();

    let mut group = c.benchmark_group("tournament_select_population");
    for k in [2, 7, 70] {
        let tournament = Tournament::new(k);
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, _| {
            b.iter(|| black_box(tournament.select_population(&population, &matrix, &mut rng)))
        });
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let matrix = ring(52);
    let mut group = c.benchmark_group("ga_run_52_nodes");
    group.sample_size(10);
    for (name, config) in [("simple", GaConfig::simple()), ("extended", GaConfig::extended())] {
        let config = config
            .with_population_size(50)
            .with_tournament_size(5)
            .with_iterations(100)
            .with_seed(42);
        group.bench_function(name, |b| {
            b.iter(|| black_box(GaRunner::new(&matrix, &config).run(&mut NoProgress)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_tour_length,
    bench_operators,
    bench_selection,
    bench_run
);
criterion_main!(benches);
