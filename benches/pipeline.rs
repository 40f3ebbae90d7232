//! Throughput benchmarks for the extraction pipeline.
//!
//! # Usage
//!
//! ```bash
//! cargo bench --bench pipeline
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sofia::Pipeline;
use sofia_core::{AnnotatedDocument, SentenceAnnotation};

fn rain_sentence() -> SentenceAnnotation {
    SentenceAnnotation::from_words(&[
        ("The", "DT", "the"),
        ("intense", "JJ", "intense"),
        ("rain", "NN", "rain"),
        ("caused", "VBD", "cause"),
        ("flooding", "NN", "flooding"),
        ("in", "IN", "in"),
        ("the", "DT", "the"),
        ("area", "NN", "area"),
    ])
    .with_dependency(4, 3, "nsubj")
    .with_dependency(4, 5, "dobj")
    .with_dependency(5, 8, "nmod:in")
    .with_noun_phrase_over(0..=2, "rain")
    .with_noun_phrase_over(4..=4, "flooding")
    .with_noun_phrase_over(6..=7, "area")
}

fn document(sentences: usize) -> AnnotatedDocument {
    AnnotatedDocument::new("", (0..sentences).map(|_| rain_sentence()).collect())
}

fn bench_process_document(c: &mut Criterion) {
    let pipeline = Pipeline::default();
    let mut group = c.benchmark_group("process_document");
    for size in [1, 10, 100] {
        let doc = document(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| pipeline.process_document(black_box(doc), None))
        });
    }
    group.finish();
}

fn bench_process_queries(c: &mut Criterion) {
    let pipeline = Pipeline::default();
    let doc = document(100);
    c.bench_function("process_queries/100x2", |b| {
        b.iter(|| pipeline.process_queries(black_box(&doc), &["rain", "flooding"]))
    });
}

criterion_group!(benches, bench_process_document, bench_process_queries);
criterion_main!(benches);
