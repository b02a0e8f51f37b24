//! Tests for the paging controller.

use super::*;
use crate::model::RawReview;
use crate::source::FetchCompletion;
use crate::view::measure::MonospaceMeasurer;
use crate::view::rating::StarRatingRenderer;
use crate::view::styles::Typography;
use std::sync::Mutex;

// ===== Test Helpers =====

fn raw_review(i: usize) -> RawReview {
    RawReview {
        first_name: "User".to_string(),
        last_name: i.to_string(),
        rating: 5,
        photo_urls: Vec::new(),
        text: format!("Review {i}"),
        created: "1 May".to_string(),
    }
}

/// Answers every fetch inline from `total` generated reviews.
struct InlineSource {
    total: usize,
    requests: Mutex<Vec<(usize, usize)>>,
}

impl InlineSource {
    fn new(total: usize) -> Arc<Self> {
        Arc::new(Self {
            total,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().expect("lock").len()
    }
}

impl ReviewsSource for InlineSource {
    fn fetch(&self, offset: usize, limit: usize, completion: FetchCompletion) {
        self.requests.lock().expect("lock").push((offset, limit));
        let end = (offset + limit).min(self.total);
        let items = (offset.min(end)..end).map(raw_review).collect();
        completion(Ok(RawPage {
            items,
            count: self.total,
        }));
    }
}

/// Parks completions until the test resolves them, oldest first.
#[derive(Default)]
struct ManualSource {
    pending: Mutex<Vec<((usize, usize), FetchCompletion)>>,
}

impl ManualSource {
    fn pending_count(&self) -> usize {
        self.pending.lock().expect("lock").len()
    }

    fn pending_request(&self, index: usize) -> (usize, usize) {
        self.pending.lock().expect("lock")[index].0
    }

    fn complete_next(&self, result: Result<RawPage, FetchError>) {
        let (_, completion) = self.pending.lock().expect("lock").remove(0);
        completion(result);
    }
}

impl ReviewsSource for ManualSource {
    fn fetch(&self, offset: usize, limit: usize, completion: FetchCompletion) {
        self.pending
            .lock()
            .expect("lock")
            .push(((offset, limit), completion));
    }
}

fn page(range: std::ops::Range<usize>, count: usize) -> RawPage {
    RawPage {
        items: range.map(raw_review).collect(),
        count,
    }
}

fn controller(source: Arc<dyn ReviewsSource>) -> PagingController {
    let typography = Typography::default();
    PagingController::new(
        source,
        RowFactory::new(typography.clone(), Arc::new(StarRatingRenderer::default())),
        ItemLayoutEngine::new(Arc::new(MonospaceMeasurer::new()), &typography),
        PagingConfig::default(),
    )
}

fn review_names(controller: &PagingController) -> Vec<String> {
    controller
        .rows()
        .iter()
        .filter_map(RowItem::as_review)
        .map(|row| row.full_name().text().to_string())
        .collect()
}

fn review_id(controller: &PagingController, index: usize) -> RowId {
    controller
        .row(index)
        .and_then(RowItem::as_review)
        .map(|row| row.id())
        .expect("review row at index")
}

// ===== Pagination merge =====

#[test]
fn pages_merge_until_exhausted() {
    let source = InlineSource::new(55);
    let mut controller = controller(source.clone());

    assert!(controller.request_next_page());
    assert_eq!(controller.pump(), 1);
    assert_eq!(controller.row_count(), 21);
    assert!(controller.has_more());
    assert_eq!(controller.phase(), PagingPhase::IdleWithMore);

    assert!(controller.request_next_page());
    controller.pump();
    assert_eq!(controller.row_count(), 41);
    assert!(controller.has_more());

    assert!(controller.request_next_page());
    controller.pump();
    assert_eq!(controller.row_count(), 56);
    assert!(!controller.has_more());
    assert_eq!(controller.phase(), PagingPhase::IdleExhausted);

    assert!(!controller.request_next_page());
    assert_eq!(source.request_count(), 3);
}

#[test]
fn requests_advance_offset_by_limit() {
    let source = InlineSource::new(55);
    let mut controller = controller(source.clone());
    for _ in 0..3 {
        controller.request_next_page();
        controller.pump();
    }
    let requests = source.requests.lock().expect("lock").clone();
    assert_eq!(requests, vec![(0, 20), (20, 20), (40, 20)]);
    assert_eq!(controller.page_state().offset(), 60);
}

#[test]
fn summary_row_is_unique_and_last() {
    let mut controller = controller(InlineSource::new(55));
    for _ in 0..3 {
        controller.request_next_page();
        controller.pump();
        let rows = controller.rows();
        let summaries = rows.iter().filter(|r| r.is_summary()).count();
        assert_eq!(summaries, 1);
        assert!(rows.last().is_some_and(RowItem::is_summary));
    }
    let label = controller
        .rows()
        .last()
        .and_then(RowItem::as_summary)
        .map(|s| s.label().text().to_string());
    assert_eq!(label.as_deref(), Some("55 reviews"));
}

#[test]
fn rows_keep_payload_order_across_pages() {
    let mut controller = controller(InlineSource::new(25));
    controller.request_next_page();
    controller.pump();
    controller.request_next_page();
    controller.pump();

    let names = review_names(&controller);
    let expected: Vec<String> = (0..25).map(|i| format!("User {i}")).collect();
    assert_eq!(names, expected);
}

#[test]
fn empty_first_page_yields_only_summary() {
    let mut controller = controller(InlineSource::new(0));
    controller.request_next_page();
    controller.pump();

    assert_eq!(controller.row_count(), 1);
    assert!(controller.row(0).is_some_and(RowItem::is_summary));
    assert_eq!(controller.phase(), PagingPhase::IdleExhausted);
}

#[test]
fn request_while_in_flight_is_ignored() {
    let source = Arc::new(ManualSource::default());
    let mut controller = controller(source.clone());

    assert!(controller.request_next_page());
    assert_eq!(controller.phase(), PagingPhase::FetchInFlight);
    assert!(!controller.request_next_page());
    assert_eq!(source.pending_count(), 1);
}

// ===== Refresh =====

#[test]
fn refresh_replaces_rows_even_when_exhausted() {
    let source = InlineSource::new(55);
    let mut controller = controller(source.clone());
    for _ in 0..3 {
        controller.request_next_page();
        controller.pump();
    }
    assert!(!controller.has_more());
    let old_first = review_id(&controller, 0);

    controller.refresh();
    controller.pump();

    assert_eq!(controller.row_count(), 21);
    assert!(controller.has_more());
    assert_eq!(controller.page_state().offset(), 20);
    assert_ne!(review_id(&controller, 0), old_first, "rows were rebuilt");
    assert_eq!(source.requests.lock().expect("lock").last(), Some(&(0, 20)));
}

#[test]
fn refresh_discards_response_from_previous_generation() {
    let source = Arc::new(ManualSource::default());
    let mut controller = controller(source.clone());

    controller.request_next_page();
    controller.refresh();
    assert_eq!(source.pending_count(), 2);
    assert_eq!(source.pending_request(1), (0, 20));
    assert_eq!(controller.outstanding(), 2);

    // Old generation lands first: ignored.
    source.complete_next(Ok(page(0..20, 100)));
    controller.pump();
    assert_eq!(controller.row_count(), 0);
    assert_eq!(controller.phase(), PagingPhase::FetchInFlight);

    source.complete_next(Ok(page(0..3, 3)));
    controller.pump();
    assert_eq!(controller.row_count(), 4);
    assert_eq!(controller.phase(), PagingPhase::IdleExhausted);
    assert_eq!(controller.outstanding(), 0);
}

// ===== Failures =====

#[test]
fn failure_returns_to_idle_with_more_without_touching_rows() {
    let source = Arc::new(ManualSource::default());
    let mut controller = controller(source.clone());
    let rows_rx = controller.subscribe_rows();

    controller.request_next_page();
    source.complete_next(Err(FetchError::Transport("offline".into())));
    controller.pump();

    assert_eq!(controller.phase(), PagingPhase::IdleWithMore);
    assert_eq!(controller.row_count(), 0);
    let snapshot = rows_rx.try_recv().expect("observers notified on failure");
    assert!(snapshot.is_empty());

    // Retry is allowed immediately.
    assert!(controller.request_next_page());
}

#[test]
fn failure_after_exhaustion_reopens_paging() {
    let source = Arc::new(ManualSource::default());
    let mut controller = controller(source.clone());
    controller.request_next_page();
    source.complete_next(Ok(page(0..3, 3)));
    controller.pump();
    assert_eq!(controller.phase(), PagingPhase::IdleExhausted);

    controller.refresh();
    source.complete_next(Err(FetchError::Decode("bad json".into())));
    controller.pump();
    assert_eq!(controller.phase(), PagingPhase::IdleWithMore);
    assert_eq!(controller.row_count(), 4, "old rows survive a failed refresh");
}

#[test]
fn invalid_record_fails_whole_page() {
    let source = Arc::new(ManualSource::default());
    let mut controller = controller(source.clone());
    controller.request_next_page();

    let mut bad = page(0..5, 5);
    bad.items[2].rating = 9;
    source.complete_next(Ok(bad));
    controller.pump();

    assert_eq!(controller.row_count(), 0);
    assert_eq!(controller.phase(), PagingPhase::IdleWithMore);
}

// ===== Loading indicator =====

#[test]
fn loading_indicator_brackets_first_page_only() {
    let source = Arc::new(ManualSource::default());
    let mut controller = controller(source.clone());
    let loading_rx = controller.subscribe_loading();

    controller.request_next_page();
    assert!(controller.is_loading());
    source.complete_next(Ok(page(0..20, 55)));
    controller.pump();
    assert!(!controller.is_loading());

    controller.request_next_page();
    source.complete_next(Ok(page(20..40, 55)));
    controller.pump();

    let events: Vec<bool> = loading_rx.try_iter().collect();
    assert_eq!(events, vec![true, false]);
}

#[test]
fn loading_cleared_on_failure() {
    let source = Arc::new(ManualSource::default());
    let mut controller = controller(source.clone());
    let loading_rx = controller.subscribe_loading();

    controller.refresh();
    source.complete_next(Err(FetchError::Transport("offline".into())));
    controller.pump();

    let events: Vec<bool> = loading_rx.try_iter().collect();
    assert_eq!(events, vec![true, false]);
}

// ===== Expansion =====

#[test]
fn toggle_flips_only_the_matching_row() {
    let source = InlineSource::new(55);
    let mut controller = controller(source.clone());
    controller.request_next_page();
    controller.pump();
    let rows_rx = controller.subscribe_rows();

    let id = review_id(&controller, 3);
    assert!(controller.toggle_expansion(id));

    for (i, item) in controller.rows().iter().enumerate() {
        if let Some(row) = item.as_review() {
            assert_eq!(row.expansion().is_expanded(), i == 3, "row {i}");
        }
    }
    assert!(rows_rx.try_recv().is_ok(), "observers notified");
    assert_eq!(source.request_count(), 1, "no refetch");
    assert_eq!(controller.page_state().offset(), 20);
}

#[test]
fn toggle_unknown_row_is_noop() {
    let mut controller = controller(InlineSource::new(5));
    controller.request_next_page();
    controller.pump();
    let rows_rx = controller.subscribe_rows();

    assert!(!controller.toggle_expansion(RowId::from_raw(9_999)));
    assert!(rows_rx.try_recv().is_err());
}

#[test]
fn earlier_snapshots_are_not_mutated_by_toggle() {
    let mut controller = controller(InlineSource::new(5));
    controller.request_next_page();
    controller.pump();

    let before = controller.rows();
    let id = review_id(&controller, 0);
    controller.toggle_expansion(id);

    let was = before[0].as_review().map(|r| r.expansion().is_expanded());
    let now = controller
        .row(0)
        .and_then(RowItem::as_review)
        .map(|r| r.expansion().is_expanded());
    assert_eq!(was, Some(false));
    assert_eq!(now, Some(true));
}

#[test]
fn toggle_changes_only_that_rows_height() {
    let source = Arc::new(ManualSource::default());
    let mut controller = controller(source.clone());
    controller.request_next_page();

    // Every body wraps far past the collapsed cap at 375pt.
    let mut long = page(0..3, 3);
    for item in &mut long.items {
        item.text = "word ".repeat(200);
    }
    source.complete_next(Ok(long));
    controller.pump();

    let heights = |c: &PagingController| -> Vec<Option<f64>> {
        (0..c.row_count()).map(|i| c.height_for_row(i, 375.0)).collect()
    };
    let before = heights(&controller);
    let id = review_id(&controller, 1);
    controller.toggle_expansion(id);
    let after = heights(&controller);

    for i in 0..before.len() {
        if i == 1 {
            assert!(after[i] > before[i], "toggled row grows");
        } else {
            assert_eq!(after[i], before[i], "row {i}");
        }
    }
}

// ===== Queries and prefetch =====

#[test]
fn height_for_row_delegates_to_engine() {
    let mut controller = controller(InlineSource::new(5));
    controller.request_next_page();
    controller.pump();

    for i in 0..controller.row_count() {
        let item = controller.row(i).expect("row");
        assert_eq!(
            controller.height_for_row(i, 375.0),
            Some(controller.engine().row_height(item, 375.0))
        );
    }
    assert_eq!(controller.height_for_row(99, 375.0), None);
    assert!(controller.layout_for_row(0, 375.0).is_some());
}

#[test]
fn scroll_near_end_requests_next_page() {
    let source = InlineSource::new(55);
    let mut controller = controller(source.clone());
    controller.request_next_page();
    controller.pump();

    assert!(!controller.on_scroll_will_end(ScrollMetrics::new(4000.0, 800.0, 0.0)));
    assert_eq!(source.request_count(), 1);
    assert!(controller.on_scroll_will_end(ScrollMetrics::new(4000.0, 800.0, 1200.0)));
    assert_eq!(source.request_count(), 2);
}

#[test]
fn wait_and_pump_never_blocks_when_idle() {
    let mut controller = controller(InlineSource::new(5));
    assert!(!controller.wait_and_pump());
    assert!(!controller.wait_and_pump_timeout(Duration::from_millis(1)));
}

#[test]
fn wait_and_pump_applies_threaded_response() {
    let source = crate::source::JsonFileSource::from_json_str(
        r#"{"items":[{"first_name":"Ada","last_name":"L","rating":4,"text":"Hi","created":"1 May"}]}"#,
    )
    .expect("valid document");
    let mut controller = controller(Arc::new(source));

    controller.request_next_page();
    assert!(controller.wait_and_pump());
    assert_eq!(controller.row_count(), 2);
    assert!(!controller.wait_and_pump());
}

#[test]
fn dropped_observers_are_pruned() {
    let mut controller = controller(InlineSource::new(5));
    let rows_rx = controller.subscribe_rows();
    let loading_rx = controller.subscribe_loading();
    drop(rows_rx);
    drop(loading_rx);

    controller.request_next_page();
    controller.pump();
    assert!(controller.row_observers.is_empty());
    assert!(controller.loading_observers.is_empty());
}
