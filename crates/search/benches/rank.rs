//! Benchmarks for matching and ranking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzyrank_search::{
    filter_and_rank, fuzzy_match, levenshtein_distance, relevance_score, DEFAULT_THRESHOLD,
};
use serde_json::{json, Value};

const FIRST_NAMES: &[&str] = &["Alice", "Bob", "Carol", "Dmitri", "Esther", "Farouk", "Grace"];
const ORGS: &[&str] = &["Rareminds University", "Northwind Labs", "Acme Recruiting", "Blue Harbor"];

fn create_test_records(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": format!("REC-{i:05}"),
                "name": format!("{} {}", FIRST_NAMES[i % FIRST_NAMES.len()], i),
                "profile": {
                    "organization": ORGS[i % ORGS.len()],
                    "title": if i % 3 == 0 { "Senior Recruiter" } else { "Engineer" },
                }
            })
        })
        .collect()
}

fn bench_distance(c: &mut Criterion) {
    c.bench_function("levenshtein_short", |b| {
        b.iter(|| levenshtein_distance(black_box("kitten"), black_box("sitting")))
    });

    c.bench_function("levenshtein_sentence", |b| {
        b.iter(|| {
            levenshtein_distance(
                black_box("Rareminds University Bangalore campus"),
                black_box("Raremind Universty Bengaluru"),
            )
        })
    });
}

fn bench_pair_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair_scoring");

    group.bench_function("fuzzy_match", |b| {
        b.iter(|| fuzzy_match(black_box("Rareminds University"), black_box("ranminds"), DEFAULT_THRESHOLD))
    });

    group.bench_function("relevance_score", |b| {
        b.iter(|| relevance_score(black_box("Rareminds University"), black_box("ranminds")))
    });

    group.finish();
}

fn bench_filter_and_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_and_rank");
    let fields = ["name", "profile.organization", "profile.title"];

    for size in [100, 1000, 5000].iter() {
        let records = create_test_records(*size);

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| filter_and_rank(black_box(&records), &fields, black_box("recruter"), DEFAULT_THRESHOLD))
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| {
                fuzzyrank_search::par_filter_and_rank(
                    black_box(&records),
                    &fields,
                    black_box("recruter"),
                    DEFAULT_THRESHOLD,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_distance, bench_pair_scoring, bench_filter_and_rank);
criterion_main!(benches);
