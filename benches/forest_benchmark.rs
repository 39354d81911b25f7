//! Benchmark of random forest fitting and the full analysis
//!
//! Run with: cargo bench --bench forest_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use survival_factors::pipeline::{
    run_analysis, AnalysisConfig, ForestConfig, PassengerRecord, RandomForest,
};

/// Synthetic feature matrix where the first column drives the label
fn generate_matrix(n_rows: usize, n_features: usize, seed: u64) -> (Vec<Vec<f64>>, Vec<bool>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let rows: Vec<Vec<f64>> = (0..n_rows)
        .map(|_| (0..n_features).map(|_| rng.gen::<f64>() * 100.0).collect())
        .collect();
    let labels = rows
        .iter()
        .map(|row| row[0] + rng.gen::<f64>() * 40.0 > 70.0)
        .collect();

    (rows, labels)
}

fn generate_passengers(n: usize, seed: u64) -> Vec<PassengerRecord> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    (0..n)
        .map(|i| {
            let female = rng.gen_bool(0.35);
            let pclass = rng.gen_range(1..=3u8);
            PassengerRecord {
                passenger_id: i as i64,
                survived: rng.gen_bool(if female { 0.74 } else { 0.19 }),
                pclass,
                sex: if female { "female" } else { "male" }.to_string(),
                age: rng.gen_bool(0.8).then(|| rng.gen_range(1.0..80.0)),
                sibsp: rng.gen_range(0..4),
                parch: rng.gen_range(0..3),
                fare: Some(rng.gen_range(5.0..100.0) / f64::from(pclass)),
                embarked: Some(["S", "C", "Q"][rng.gen_range(0..3)].to_string()),
                name: format!("Passenger, {}. {}", if female { "Mrs" } else { "Mr" }, i),
            }
        })
        .collect()
}

fn bench_forest_by_trees(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_by_trees");
    group.sample_size(10);

    let (rows, labels) = generate_matrix(891, 12, 42);

    for n_trees in [10, 50, 100] {
        group.throughput(Throughput::Elements(n_trees as u64));
        let config = ForestConfig {
            n_trees,
            ..ForestConfig::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(n_trees), &config, |b, config| {
            b.iter(|| RandomForest::fit(black_box(config.clone()), &rows, &labels))
        });
    }

    group.finish();
}

fn bench_forest_by_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_by_rows");
    group.sample_size(10);

    for n_rows in [500, 2_000, 10_000] {
        let (rows, labels) = generate_matrix(n_rows, 12, 7);
        group.throughput(Throughput::Elements(n_rows as u64));
        let config = ForestConfig {
            n_trees: 20,
            ..ForestConfig::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &rows, |b, rows| {
            b.iter(|| RandomForest::fit(config.clone(), black_box(rows), &labels))
        });
    }

    group.finish();
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");
    group.sample_size(10);

    let passengers = generate_passengers(891, 1912);
    let config = AnalysisConfig::default();

    group.bench_function("titanic_sized", |b| {
        b.iter(|| run_analysis(black_box(&passengers), &config))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_forest_by_trees,
    bench_forest_by_rows,
    bench_full_analysis
);
criterion_main!(benches);
