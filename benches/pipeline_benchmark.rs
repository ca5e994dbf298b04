//! Benchmarks for the structure pipeline.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic multi-page span streams.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdfstructure::{Document, RawSpan, Span, StructureOptions};

const PAGE_HEIGHT: f64 = 842.0;

/// Creates a span stream with a repeating header, a page-number footer and
/// a few paragraphs and bullets per page.
fn create_test_spans(page_count: u32) -> Vec<RawSpan> {
    let mut spans = Vec::new();

    let at = |page: u32, block: u32, line: u32, number: u32, text: String, x1: f64, x2: f64, y: f64| {
        RawSpan::new(page, block, line, number, text)
            .with_bbox(x1, y - 10.0, x2, y + 2.0)
            .with_origin(x1, y)
            .with_total_y(page as f64 * PAGE_HEIGHT + y)
    };

    for page in 0..page_count {
        spans.push(at(page, 0, 0, 0, "Emergency Plan of Action".to_string(), 50.0, 260.0, 30.0));

        for paragraph in 0..4 {
            let block = paragraph + 1;
            let y = 100.0 + paragraph as f64 * 120.0;
            spans.push(at(page, block, 0, 0, format!("Paragraph {paragraph} on page {page} begins"), 50.0, 330.0, y));
            spans.push(at(page, block, 0, 1, "with several words".to_string(), 333.0, 500.0, y));
            spans.push(at(page, block, 1, 0, "and continues on the next line".to_string(), 50.0, 500.0, y + 14.0));
            spans.push(at(page, block, 2, 0, format!("until it stops {paragraph}."), 50.0, 220.0, y + 28.0));
            spans.push(at(page, block, 3, 0, "•".to_string(), 50.0, 56.0, y + 50.0));
            spans.push(at(page, block, 3, 1, format!("Bullet point {paragraph}"), 62.0, 300.0, y + 50.0));
        }

        spans.push(at(page, 9, 0, 0, format!("Page {}", page + 1), 280.0, 320.0, 800.0));
    }

    spans
}

/// Benchmark the whole pipeline at various sizes.
fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");

    for page_count in [1, 10, 50].iter() {
        let spans = create_test_spans(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let doc = Document::new(black_box(spans.clone())).unwrap();
                black_box(doc.items())
            });
        });
    }

    group.finish();
}

/// Benchmark the cleaning stages alone.
fn bench_clean_lines(c: &mut Criterion) {
    let spans = Span::decorate_all(create_test_spans(20));
    let options = StructureOptions::default();

    c.bench_function("clean_lines_20_pages", |b| {
        b.iter(|| pdfstructure::clean_lines(black_box(spans.clone()), &options).unwrap());
    });
}

criterion_group!(benches, bench_document, bench_clean_lines);
criterion_main!(benches);
