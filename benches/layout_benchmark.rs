//! Layout throughput benchmarks.
//!
//! Measures a cold layout pass over a page of reviews, a width change that
//! forces every row to be re-measured, and an expansion toggle that should
//! only re-measure one row.
//!
//! Run with: cargo bench --bench layout_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use revlist::model::ReviewRecord;
use revlist::state::RowFactory;
use revlist::view::{MonospaceMeasurer, StarRatingRenderer, Typography};
use revlist::view_state::layout::ItemLayoutEngine;
use revlist::view_state::list::ReviewListViewState;
use revlist::view_state::row::{RowItem, RowsSnapshot};
use std::sync::Arc;

fn build_rows(count: usize) -> (ItemLayoutEngine, RowsSnapshot) {
    let typography = Typography::default();
    let engine = ItemLayoutEngine::new(Arc::new(MonospaceMeasurer::new()), &typography);
    let mut factory = RowFactory::new(typography, Arc::new(StarRatingRenderer::default()));

    let mut rows: Vec<RowItem> = (0..count)
        .map(|i| {
            let photos = (0..i % 7)
                .map(|p| format!("https://example.com/{i}/{p}.jpg"))
                .collect();
            let text = "The coffee was great and the staff friendly. ".repeat(i % 12);
            let record = ReviewRecord::new("Bench", i.to_string(), (i % 5 + 1) as i64, photos, text, "3 days ago")
                .expect("valid record");
            RowItem::Review(factory.make_review(&record))
        })
        .collect();
    rows.push(RowItem::Summary(factory.make_summary(count)));
    (engine, Arc::new(rows))
}

fn bench_cold_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_layout");
    for count in [20usize, 200, 2000] {
        let (engine, rows) = build_rows(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &rows, |b, rows| {
            b.iter(|| {
                let mut list = ReviewListViewState::new(engine.clone(), 375.0);
                list.apply_snapshot(Arc::clone(rows));
                black_box(list.content_height())
            });
        });
    }
    group.finish();
}

fn bench_width_change(c: &mut Criterion) {
    let (engine, rows) = build_rows(500);
    c.bench_function("relayout_on_width_change_500", |b| {
        b.iter_batched(
            || {
                let mut list = ReviewListViewState::new(engine.clone(), 375.0);
                list.apply_snapshot(Arc::clone(&rows));
                list
            },
            |mut list| black_box(list.set_width(414.0)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_toggle(c: &mut Criterion) {
    let (engine, rows) = build_rows(500);
    c.bench_function("relayout_after_toggle_500", |b| {
        b.iter_batched(
            || {
                let mut list = ReviewListViewState::new(engine.clone(), 375.0);
                list.apply_snapshot(Arc::clone(&rows));
                let mut toggled = (*rows).clone();
                if let Some(row) = toggled[250].as_review_mut() {
                    row.toggle_expansion();
                }
                (list, Arc::new(toggled))
            },
            |(mut list, toggled)| black_box(list.apply_snapshot(toggled)),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_cold_layout, bench_width_change, bench_toggle);
criterion_main!(benches);
