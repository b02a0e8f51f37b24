//! List host view-state: cached row heights and scroll geometry.
//!
//! The presentation host pulls heights per index; this type memoizes them so
//! a new row snapshot only re-measures rows whose content or expansion
//! changed. Heights are valid for one width; changing the width drops the
//! whole cache.

use super::height_index::HeightIndex;
use super::layout::{ItemLayoutEngine, RowLayout};
use super::row::{RowItem, RowsSnapshot, TextExpansionState};
use super::scroll::{ScrollMetrics, ScrollPosition};
use super::types::sanitize_extent;
use super::visible_range::VisibleRange;
use crate::model::RowId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Identity of a row's measured content at the current width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RowKey {
    Review {
        id: RowId,
        expansion: TextExpansionState,
    },
    Summary {
        total: usize,
    },
}

impl RowKey {
    fn of(item: &RowItem) -> Self {
        match item {
            RowItem::Review(row) => Self::Review {
                id: row.id(),
                expansion: row.expansion(),
            },
            RowItem::Summary(row) => Self::Summary { total: row.total() },
        }
    }
}

/// View-state of the virtualized review list.
#[derive(Debug, Clone)]
pub struct ReviewListViewState {
    engine: ItemLayoutEngine,
    width: f64,
    rows: RowsSnapshot,
    index: HeightIndex,
    heights: HashMap<RowKey, f64>,
    scroll_offset: f64,
    viewport_height: f64,
}

impl ReviewListViewState {
    /// Create an empty list laid out at `width`.
    pub fn new(engine: ItemLayoutEngine, width: f64) -> Self {
        Self {
            engine,
            width: sanitize_extent(width),
            rows: Arc::new(Vec::new()),
            index: HeightIndex::default(),
            heights: HashMap::new(),
            scroll_offset: 0.0,
            viewport_height: 0.0,
        }
    }

    /// Layout width in effect.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Change the layout width. Re-measures every row when it differs.
    ///
    /// Returns the number of rows re-measured.
    pub fn set_width(&mut self, width: f64) -> usize {
        let width = sanitize_extent(width);
        if width == self.width {
            return 0;
        }
        self.width = width;

        let engine = &self.engine;
        let mut heights = HashMap::with_capacity(self.rows.len());
        self.index = HeightIndex::from_heights(self.rows.iter().map(|item| {
            let height = engine.row_height(item, width);
            heights.insert(RowKey::of(item), height);
            height
        }));
        self.heights = heights;
        self.scroll_offset = self.resolve(ScrollPosition::AtOffset(self.scroll_offset));

        debug!(width, rows = self.rows.len(), "Relaid out rows for new width");
        self.rows.len()
    }

    /// Install a new row snapshot.
    ///
    /// Rows whose identity and expansion state are unchanged keep their
    /// cached height. Returns the number of rows re-measured.
    pub fn apply_snapshot(&mut self, rows: RowsSnapshot) -> usize {
        let mut remeasured = 0;
        let mut next = HashMap::with_capacity(rows.len());
        self.index.truncate(rows.len());

        for (position, item) in rows.iter().enumerate() {
            let key = RowKey::of(item);
            let height = match self.heights.get(&key).or_else(|| next.get(&key)) {
                Some(&cached) => cached,
                None => {
                    remeasured += 1;
                    self.engine.row_height(item, self.width)
                }
            };
            next.insert(key, height);

            // Unchanged rows are a no-op in `set`; appended rows grow the tree.
            if position < self.index.len() {
                self.index.set(position, height);
            } else {
                self.index.push(height);
            }
        }

        self.heights = next;
        self.rows = rows;
        self.scroll_offset = self.resolve(ScrollPosition::AtOffset(self.scroll_offset));

        debug!(
            rows = self.rows.len(),
            remeasured,
            content_height = self.index.total(),
            "Applied row snapshot"
        );
        remeasured
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Row at `index`.
    pub fn row(&self, index: usize) -> Option<&RowItem> {
        self.rows.get(index)
    }

    /// Current snapshot.
    pub fn rows(&self) -> &RowsSnapshot {
        &self.rows
    }

    /// Cached height of the row at `index`.
    pub fn height_for_row(&self, index: usize) -> Option<f64> {
        self.index.height(index)
    }

    /// Fresh element frames of the row at `index`.
    pub fn layout_for_row(&self, index: usize) -> Option<RowLayout> {
        self.rows
            .get(index)
            .map(|item| self.engine.compute_layout(item, self.width))
    }

    /// Top edge of the row at `index`.
    pub fn row_offset(&self, index: usize) -> Option<f64> {
        (index < self.rows.len()).then(|| self.index.offset_of(index))
    }

    /// Sum of all row heights.
    pub fn content_height(&self) -> f64 {
        self.index.total()
    }

    /// Row containing the vertical `offset`.
    pub fn row_at_offset(&self, offset: f64) -> Option<usize> {
        self.index.lower_bound(offset)
    }

    /// Set the viewport height and re-clamp the scroll offset.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = sanitize_extent(height).max(0.0);
        self.scroll_offset = self.resolve(ScrollPosition::AtOffset(self.scroll_offset));
    }

    /// Viewport height.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Scroll to a position; returns the resolved offset.
    pub fn scroll_to(&mut self, position: ScrollPosition) -> f64 {
        self.scroll_offset = self.resolve(position);
        self.scroll_offset
    }

    /// Scroll by `delta` points.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        self.scroll_to(ScrollPosition::AtOffset(self.scroll_offset + delta))
    }

    /// Scroll geometry with the current offset as the resting target.
    pub fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(
            self.content_height(),
            self.viewport_height,
            self.scroll_offset,
        )
    }

    /// Rows intersecting the viewport.
    pub fn visible_range(&self) -> VisibleRange {
        let len = self.rows.len();
        if len == 0 || self.viewport_height <= 0.0 {
            return VisibleRange::new(0, 0, self.scroll_offset, self.viewport_height);
        }

        let top = self.scroll_offset;
        let bottom = top + self.viewport_height;
        let start = self.index.lower_bound(top).unwrap_or(len);
        let end = match self.index.lower_bound(bottom) {
            Some(i) if self.index.offset_of(i) < bottom => i + 1,
            Some(i) => i,
            None => len,
        };

        VisibleRange::new(start, end.max(start), top, self.viewport_height)
    }

    fn resolve(&self, position: ScrollPosition) -> f64 {
        position.resolve(self.content_height(), self.viewport_height, |i| {
            self.row_offset(i)
        })
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
