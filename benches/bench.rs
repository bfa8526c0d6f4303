//! Criterion benchmarks for Glaive.
//!
//! Covers the three hot paths:
//! - Text normalization
//! - Index building, sequential and parallel
//! - Barreled query processing

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use glaive::analysis::Normalizer;
use glaive::barrel::{BarrelSet, PartitionRangeConfig, PartitionTable};
use glaive::config::IndexConfig;
use glaive::document::Document;
use glaive::index::IndexBuilder;
use glaive::morphology::SuffixLemmatizer;
use glaive::search::QueryProcessor;

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<Document> {
    let words = [
        "search", "engines", "full", "text", "index", "queries", "document", "field", "term",
        "phrase", "boolean", "barrel", "lexicon", "postings", "analysis", "tokens", "stemming",
        "normalization", "clusters", "machine", "learning", "algorithm", "data", "structure",
        "performance", "2024", "memory", "storage", "retrieval", "ranking", "filters", "café",
    ];

    (0..count)
        .map(|i| {
            let doc_length = 50 + (i % 100); // Variable length documents
            let text = (0..doc_length)
                .map(|j| words[(i * 7 + j * 13) % words.len()]) // Pseudo-random distribution
                .collect::<Vec<_>>()
                .join(" ");
            Document::from_text(format!("doc{i:05}"), text)
        })
        .collect()
}

/// Benchmark text normalization.
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let normalizer = Normalizer::new();
    let lemmatizing = Normalizer::with_morphology(Arc::new(SuffixLemmatizer::new()));
    let texts: Vec<String> = generate_test_documents(100)
        .iter()
        .map(Document::content)
        .collect();

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("normalize_batch", |b| {
        b.iter(|| {
            for text in &texts {
                let _ = black_box(normalizer.normalize(black_box(text)));
            }
        })
    });

    group.bench_function("normalize_batch_lemmatized", |b| {
        b.iter(|| {
            for text in &texts {
                let _ = black_box(lemmatizing.normalize(black_box(text)));
            }
        })
    });

    group.finish();
}

/// Benchmark index building.
fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.sample_size(20);

    let documents = generate_test_documents(2000);
    group.throughput(Throughput::Elements(documents.len() as u64));

    let sequential = IndexBuilder::new(Normalizer::new(), &IndexConfig::default()).unwrap();
    group.bench_function("build_sequential", |b| {
        b.iter_with_setup(
            || documents.clone(),
            |docs| black_box(sequential.build(docs).unwrap()),
        )
    });

    let mut config = IndexConfig::default();
    config.parallelism.enabled = true;
    let parallel = IndexBuilder::new(Normalizer::new(), &config).unwrap();
    group.bench_function("build_parallel", |b| {
        b.iter_with_setup(
            || documents.clone(),
            |docs| black_box(parallel.build_parallel(docs).unwrap()),
        )
    });

    group.finish();
}

/// Benchmark query processing over in-memory barrels.
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let snapshot = IndexBuilder::new(Normalizer::new(), &IndexConfig::default())
        .unwrap()
        .build(generate_test_documents(2000))
        .unwrap();
    let table = PartitionTable::new(PartitionRangeConfig::default_table()).unwrap();
    let barrels = Arc::new(BarrelSet::from_index(&snapshot.inverted, &table));
    let processor = QueryProcessor::new(
        Normalizer::new(),
        Arc::new(SuffixLemmatizer::new()),
        table,
        barrels,
    );

    group.bench_function("single_term", |b| {
        b.iter(|| black_box(processor.search(black_box("lexicon"), false).unwrap()))
    });

    group.bench_function("three_terms", |b| {
        b.iter(|| black_box(processor.search(black_box("barrel postings data"), false).unwrap()))
    });

    group.bench_function("three_terms_expanded", |b| {
        b.iter(|| black_box(processor.search(black_box("barrels posting engine"), true).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_normalization,
    bench_index_build,
    bench_search
);
criterion_main!(benches);
