//! # Heuristic Benchmarks
//!
//! Performance benchmarks for gleaner-core keyword extraction and scoring.
//!
//! Run with: `cargo bench -p gleaner-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gleaner_core::{MemoryStore, NewAnalysis, Sentiment, compute_confidence, extract_keywords};
use std::hint::black_box;

const PARAGRAPH: &str = "Rust's ownership model lets developers build reliable systems. \
    The compiler checks borrowing rules, and Cargo manages dependencies. \
    Developers love the compiler's error messages. ";

fn bench_extract_keywords(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_keywords");

    for repeats in [1usize, 10, 100].iter() {
        let text = PARAGRAPH.repeat(*repeats);
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &text, |b, text| {
            b.iter(|| black_box(extract_keywords(black_box(text))));
        });
    }

    group.finish();
}

fn bench_confidence(c: &mut Criterion) {
    let text = PARAGRAPH.repeat(100);
    c.bench_function("compute_confidence", |b| {
        b.iter(|| black_box(compute_confidence(black_box(&text), true)));
    });
}

fn bench_store_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_store_search");

    for size in [100usize, 1000, 10000].iter() {
        let store = MemoryStore::new();
        for i in 0..*size {
            store.insert(NewAnalysis {
                id: None,
                title: None,
                summary: String::new(),
                topics: vec![format!("topic{}", i % 50)],
                sentiment: Sentiment::Neutral,
                keywords: vec![format!("kw{}", i % 7)],
                confidence: 0.7,
                text: String::new(),
            });
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| black_box(store.search(black_box("Topic7"))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_keywords,
    bench_confidence,
    bench_store_search
);
criterion_main!(benches);
