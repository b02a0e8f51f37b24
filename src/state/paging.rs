//! Incremental pagination state machine.
//!
//! The controller owns the ordered row list and is driven from a single
//! presentation context. Fetch completions may land on any thread; they only
//! enqueue a response, which the owner applies with [`PagingController::pump`]
//! or [`PagingController::wait_and_pump`].
//!
//! # Phases
//!
//! ```text
//!   IdleWithMore --request_next_page--> FetchInFlight
//!   FetchInFlight --success, offset < total--> IdleWithMore
//!   FetchInFlight --success, offset >= total--> IdleExhausted
//!   FetchInFlight --failure--> IdleWithMore
//!   any --refresh--> FetchInFlight (offset 0, older responses discarded)
//! ```

use super::prefetch::PrefetchPolicy;
use super::row_factory::RowFactory;
use crate::model::{FetchError, RawPage, ReviewRecord, RowId};
use crate::source::ReviewsSource;
use crate::view_state::layout::{ItemLayoutEngine, RowLayout};
use crate::view_state::row::{RowItem, RowsSnapshot};
use crate::view_state::scroll::ScrollMetrics;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default number of reviews requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Where the controller is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingPhase {
    /// Idle; another page can be requested.
    IdleWithMore,
    /// Idle; every page has been merged.
    IdleExhausted,
    /// A page request is outstanding.
    FetchInFlight,
}

/// Paging bookkeeping plus the current row sequence.
///
/// # Invariants
/// - `offset` only decreases on refresh (reset to 0)
/// - The summary row, if present, is the last row and is unique
#[derive(Debug, Clone)]
pub struct PageState {
    offset: usize,
    limit: usize,
    has_more: bool,
    in_flight: bool,
    total: Option<usize>,
    rows: RowsSnapshot,
}

impl PageState {
    fn new(limit: usize) -> Self {
        Self {
            offset: 0,
            limit: limit.max(1),
            has_more: true,
            in_flight: false,
            total: None,
            rows: Arc::new(Vec::new()),
        }
    }

    /// Next index to fetch.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// True while more pages are available.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Server-reported total from the last merged page.
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// Current rows.
    pub fn rows(&self) -> &RowsSnapshot {
        &self.rows
    }

    /// Phase derived from the flags.
    pub fn phase(&self) -> PagingPhase {
        if self.in_flight {
            PagingPhase::FetchInFlight
        } else if self.has_more {
            PagingPhase::IdleWithMore
        } else {
            PagingPhase::IdleExhausted
        }
    }
}

/// Tunables of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagingConfig {
    /// Reviews per page (at least 1).
    pub page_size: usize,
    /// Prefetch look-ahead in viewport heights.
    pub prefetch_screens: f64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            prefetch_screens: super::prefetch::DEFAULT_PREFETCH_SCREENS,
        }
    }
}

/// Identifies the request a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FetchTicket {
    generation: u64,
    offset: usize,
    limit: usize,
}

#[derive(Debug)]
struct FetchResponse {
    ticket: FetchTicket,
    result: Result<RawPage, FetchError>,
}

/// Owns the row list, issues fetches and merges pages.
pub struct PagingController {
    source: Arc<dyn ReviewsSource>,
    factory: RowFactory,
    engine: ItemLayoutEngine,
    prefetch: PrefetchPolicy,
    page: PageState,
    generation: u64,
    loading: bool,
    outstanding: usize,
    responses_tx: Sender<FetchResponse>,
    responses_rx: Receiver<FetchResponse>,
    row_observers: Vec<Sender<RowsSnapshot>>,
    loading_observers: Vec<Sender<bool>>,
}

impl std::fmt::Debug for PagingController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagingController")
            .field("page", &self.page)
            .field("generation", &self.generation)
            .field("loading", &self.loading)
            .field("outstanding", &self.outstanding)
            .finish_non_exhaustive()
    }
}

impl PagingController {
    /// Create an idle controller with no rows.
    pub fn new(
        source: Arc<dyn ReviewsSource>,
        factory: RowFactory,
        engine: ItemLayoutEngine,
        config: PagingConfig,
    ) -> Self {
        let (responses_tx, responses_rx) = mpsc::channel();
        Self {
            source,
            factory,
            engine,
            prefetch: PrefetchPolicy::new(config.prefetch_screens),
            page: PageState::new(config.page_size),
            generation: 0,
            loading: false,
            outstanding: 0,
            responses_tx,
            responses_rx,
            row_observers: Vec::new(),
            loading_observers: Vec::new(),
        }
    }

    // ===== Observers =====

    /// Receive every new row snapshot.
    pub fn subscribe_rows(&mut self) -> Receiver<RowsSnapshot> {
        let (tx, rx) = mpsc::channel();
        self.row_observers.push(tx);
        rx
    }

    /// Receive loading indicator changes.
    pub fn subscribe_loading(&mut self) -> Receiver<bool> {
        let (tx, rx) = mpsc::channel();
        self.loading_observers.push(tx);
        rx
    }

    // ===== Commands =====

    /// Request the next page if idle with more available.
    ///
    /// Returns true when a fetch was issued.
    pub fn request_next_page(&mut self) -> bool {
        if self.page.phase() != PagingPhase::IdleWithMore {
            debug!(phase = ?self.page.phase(), "Next page not requested");
            return false;
        }
        self.issue_fetch();
        true
    }

    /// Restart from the first page, whatever the current phase.
    ///
    /// Any response still outstanding from before is discarded when it
    /// arrives. Existing rows stay visible until the first page replaces
    /// them.
    pub fn refresh(&mut self) {
        self.generation += 1;
        self.page.offset = 0;
        info!(generation = self.generation, "Refreshing reviews");
        self.issue_fetch();
    }

    /// Flip the expansion of the review row with `id`.
    ///
    /// Returns false (and notifies nobody) when no such row exists.
    pub fn toggle_expansion(&mut self, id: RowId) -> bool {
        let Some(position) = self
            .page
            .rows
            .iter()
            .position(|item| item.as_review().is_some_and(|row| row.id() == id))
        else {
            debug!(%id, "Toggle for unknown row ignored");
            return false;
        };

        let rows = Arc::make_mut(&mut self.page.rows);
        if let Some(row) = rows[position].as_review_mut() {
            let state = row.toggle_expansion();
            debug!(%id, ?state, "Expansion toggled");
        }
        self.notify_rows();
        true
    }

    /// Prefetch trigger: call when the scroll host knows where it will
    /// settle. Returns true when a fetch was issued.
    pub fn on_scroll_will_end(&mut self, metrics: ScrollMetrics) -> bool {
        if self.prefetch.should_load_next_page(&metrics) {
            self.request_next_page()
        } else {
            false
        }
    }

    // ===== Response pump =====

    /// Apply every response that has already arrived. Never blocks.
    ///
    /// Returns the number of responses applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(response) = self.responses_rx.try_recv() {
            self.apply(response);
            applied += 1;
        }
        applied
    }

    /// Block until one outstanding response arrives and apply it.
    ///
    /// Returns false immediately when nothing is outstanding.
    pub fn wait_and_pump(&mut self) -> bool {
        if self.outstanding == 0 {
            return false;
        }
        match self.responses_rx.recv() {
            Ok(response) => {
                self.apply(response);
                true
            }
            Err(_) => false,
        }
    }

    /// Like [`PagingController::wait_and_pump`] but gives up after
    /// `timeout`.
    pub fn wait_and_pump_timeout(&mut self, timeout: Duration) -> bool {
        if self.outstanding == 0 {
            return false;
        }
        match self.responses_rx.recv_timeout(timeout) {
            Ok(response) => {
                self.apply(response);
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Number of fetches issued whose response has not been applied.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    // ===== Queries =====

    /// Paging bookkeeping.
    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    /// Current phase.
    pub fn phase(&self) -> PagingPhase {
        self.page.phase()
    }

    /// True while more pages are available.
    pub fn has_more(&self) -> bool {
        self.page.has_more
    }

    /// True while a first-page fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Review rows plus the summary row.
    pub fn row_count(&self) -> usize {
        self.page.rows.len()
    }

    /// Row at `index`.
    pub fn row(&self, index: usize) -> Option<&RowItem> {
        self.page.rows.get(index)
    }

    /// Shared snapshot of all rows.
    pub fn rows(&self) -> RowsSnapshot {
        Arc::clone(&self.page.rows)
    }

    /// Height of the row at `index` laid out at `width`.
    pub fn height_for_row(&self, index: usize, width: f64) -> Option<f64> {
        self.row(index)
            .map(|item| self.engine.row_height(item, width))
    }

    /// Element frames of the row at `index` laid out at `width`.
    pub fn layout_for_row(&self, index: usize, width: f64) -> Option<RowLayout> {
        self.row(index)
            .map(|item| self.engine.compute_layout(item, width))
    }

    /// Layout engine used for height queries.
    pub fn engine(&self) -> &ItemLayoutEngine {
        &self.engine
    }

    // ===== Internals =====

    fn issue_fetch(&mut self) {
        let ticket = FetchTicket {
            generation: self.generation,
            offset: self.page.offset,
            limit: self.page.limit,
        };
        self.page.in_flight = true;
        self.outstanding += 1;

        if ticket.offset == 0 && !self.loading {
            self.loading = true;
            self.notify_loading(true);
        }

        info!(
            offset = ticket.offset,
            limit = ticket.limit,
            generation = ticket.generation,
            "Requesting page"
        );

        let tx = self.responses_tx.clone();
        self.source.fetch(
            ticket.offset,
            ticket.limit,
            Box::new(move |result| {
                // The controller may be gone; the page is simply dropped.
                let _ = tx.send(FetchResponse { ticket, result });
            }),
        );
    }

    fn apply(&mut self, response: FetchResponse) {
        self.outstanding = self.outstanding.saturating_sub(1);
        let FetchResponse { ticket, result } = response;

        if ticket.generation != self.generation {
            debug!(
                offset = ticket.offset,
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale page"
            );
            return;
        }

        self.page.in_flight = false;
        let decoded = result.and_then(|raw| {
            let total = raw.count;
            raw.into_records().map(|records| (records, total))
        });

        match decoded {
            Ok((records, total)) => self.merge(ticket, records, total),
            Err(err) => {
                warn!(offset = ticket.offset, error = %err, "Page fetch failed; retry allowed");
                self.page.has_more = true;
            }
        }

        if self.loading {
            self.loading = false;
            self.notify_loading(false);
        }
        self.notify_rows();
    }

    fn merge(&mut self, ticket: FetchTicket, records: Vec<ReviewRecord>, total: usize) {
        let fresh: Vec<RowItem> = records
            .iter()
            .map(|record| RowItem::Review(self.factory.make_review(record)))
            .collect();
        let summary = RowItem::Summary(self.factory.make_summary(total));

        let rows = Arc::make_mut(&mut self.page.rows);
        if ticket.offset == 0 {
            rows.clear();
        } else if rows.last().is_some_and(RowItem::is_summary) {
            rows.pop();
        }
        let merged = fresh.len();
        rows.extend(fresh);
        rows.push(summary);

        self.page.offset = ticket.offset + ticket.limit;
        self.page.total = Some(total);
        self.page.has_more = self.page.offset < total;

        info!(
            offset = ticket.offset,
            merged,
            total,
            rows = rows.len(),
            has_more = self.page.has_more,
            "Page merged"
        );
    }

    fn notify_rows(&mut self) {
        let snapshot = Arc::clone(&self.page.rows);
        self.row_observers
            .retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());
    }

    fn notify_loading(&mut self, loading: bool) {
        self.loading_observers.retain(|tx| tx.send(loading).is_ok());
    }
}

#[cfg(test)]
#[path = "paging_tests.rs"]
mod tests;
