//! Visible range calculation result

use std::ops::Range;

/// Rows intersecting the viewport.
///
/// Computed by offset lookup on cumulative row heights.
///
/// # Invariants
/// - `start <= end` (end is exclusive)
/// - Every row in range has some portion inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisibleRange {
    /// First visible row (inclusive).
    pub start: usize,
    /// One past the last visible row.
    pub end: usize,
    /// Scroll offset the range was computed for.
    pub scroll_offset: f64,
    /// Viewport height the range was computed for.
    pub viewport_height: f64,
}

impl VisibleRange {
    /// Create a visible range.
    ///
    /// # Panics
    /// In debug builds, panics if `start > end`.
    pub fn new(start: usize, end: usize, scroll_offset: f64, viewport_height: f64) -> Self {
        debug_assert!(start <= end, "start {start} > end {end}");
        Self {
            start,
            end,
            scroll_offset,
            viewport_height,
        }
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visible row indices.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if a row index is visible.
    pub fn contains(&self, index: usize) -> bool {
        self.indices().contains(&index)
    }
}
