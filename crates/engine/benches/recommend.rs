//! Benchmarks for recommendation queries
//!
//! Run with: cargo bench --package engine
//!
//! This will benchmark queries against the MovieLens dataset in ../../data.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::{EngineConfig, RecommendationEngine};
use std::path::Path;

fn load_engine() -> RecommendationEngine {
    let data_dir = Path::new("../../data");
    RecommendationEngine::load(data_dir, EngineConfig::default()).expect("Failed to load test data")
}

fn bench_exact_title(c: &mut Criterion) {
    let engine = load_engine();

    c.bench_function("recommend_exact_title", |b| {
        b.iter(|| {
            let rec = engine.recommend(black_box("Toy Story (1995)"), black_box(5));
            black_box(rec)
        })
    });
}

fn bench_fuzzy_title(c: &mut Criterion) {
    let engine = load_engine();

    c.bench_function("recommend_fuzzy_title", |b| {
        b.iter(|| {
            let rec = engine.recommend(black_box("the matrx"), black_box(5));
            black_box(rec)
        })
    });
}

fn bench_not_found(c: &mut Criterion) {
    let engine = load_engine();

    c.bench_function("recommend_not_found", |b| {
        b.iter(|| black_box(engine.recommend(black_box("asdfghjkl"), black_box(5))))
    });
}

criterion_group!(benches, bench_exact_title, bench_fuzzy_title, bench_not_found);
criterion_main!(benches);
