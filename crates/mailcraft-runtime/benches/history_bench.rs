//! Benchmarks for snapshot history and drop handling.
//!
//! Every edit clones the whole document, so the cost of a push grows with
//! document size. These benches keep that cost visible for realistic email
//! sizes (tens of blocks, a handful of column rows).
//!
//! Run with: cargo bench -p mailcraft-runtime --bench history_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use mailcraft_core::{BlockFactory, DefaultBlockFactory, Document, DragPayload, DropZone, VerticalSpan};
use mailcraft_runtime::drag::{IndexStrategy, drop_index};
use mailcraft_runtime::undo::{History, HistoryConfig};
use mailcraft_runtime::{EditorConfig, EditorSession};

// ============================================================================
// Setup helpers
// ============================================================================

const TYPES: [&str; 6] = ["text", "heading", "image", "button", "divider", "spacer"];

/// Document with `n` top-level blocks, every tenth one a column row.
fn document(n: usize) -> Document {
    let mut factory = DefaultBlockFactory::new();
    let blocks = (0..n)
        .map(|i| {
            let type_id = if i % 10 == 9 { "columns" } else { TYPES[i % TYPES.len()] };
            factory
                .create_block(type_id)
                .unwrap_or_else(|e| panic!("bench setup: {e}"))
        })
        .collect();
    Document::new().with_subject("Bench").with_blocks(blocks)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_push");
    for n in [10, 50, 200] {
        let doc = document(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &doc, |b, doc| {
            let mut history = History::new(doc.clone(), HistoryConfig::default());
            let mut tick = 0u64;
            b.iter(|| {
                tick += 1;
                let mut next = history.present().clone();
                next.subject = format!("edit {tick}");
                black_box(history.push(next));
            });
        });
    }
    group.finish();
}

fn bench_unchanged_push(c: &mut Criterion) {
    let doc = document(50);
    c.bench_function("history_push_unchanged_50", |b| {
        let mut history = History::new(doc.clone(), HistoryConfig::default());
        b.iter(|| black_box(history.push(doc.clone())));
    });
}

fn bench_undo_redo(c: &mut Criterion) {
    let mut history = History::new(0u64, HistoryConfig::default());
    for i in 1..=50 {
        history.push(i);
    }
    c.bench_function("history_undo_redo_cycle", |b| {
        b.iter(|| {
            while history.undo().is_some() {}
            while history.redo().is_some() {}
            black_box(history.present());
        });
    });
}

fn bench_drop_index(c: &mut Criterion) {
    let heights: Vec<f64> = (0..200).map(|i| 20.0 + (i % 7) as f64 * 10.0).collect();
    let spans = VerticalSpan::stack(0.0, &heights, 4.0);
    let bottom = spans.last().map_or(0.0, |s| s.bottom);
    c.bench_function("drop_index_200", |b| {
        let mut y = 0.0;
        b.iter(|| {
            y = (y + 37.0) % bottom;
            black_box(drop_index(y, &spans, IndexStrategy::Edge))
        });
    });
}

fn bench_session_reorder(c: &mut Criterion) {
    let doc = document(50);
    c.bench_function("session_reorder_50", |b| {
        let mut session = EditorSession::new(EditorConfig::default());
        session.load(doc.clone());
        b.iter(|| {
            let first = session.document().blocks[0].id.clone();
            session.drag_start(DragPayload::existing(first));
            session.drag_to_index(DropZone::Root, 50);
            black_box(session.drop().ok());
        });
    });
}

criterion_group!(
    benches,
    bench_push,
    bench_unchanged_push,
    bench_undo_redo,
    bench_drop_index,
    bench_session_reorder
);
criterion_main!(benches);
