//! Scroll position and scroll geometry.

/// Geometry of the scrolling container at a point in time.
///
/// `target_offset` is where the scroll will settle (the current offset when
/// no fling is in progress).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Total height of the list content.
    pub content_height: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
    /// Vertical offset the scroll will come to rest at.
    pub target_offset: f64,
}

impl ScrollMetrics {
    /// Bundle scroll geometry.
    pub fn new(content_height: f64, viewport_height: f64, target_offset: f64) -> Self {
        Self {
            content_height,
            viewport_height,
            target_offset,
        }
    }

    /// Largest valid offset: `max(0, content - viewport)`.
    pub fn max_offset(&self) -> f64 {
        max_offset(self.content_height, self.viewport_height)
    }

    /// Distance left between the bottom of the viewport at rest and the end
    /// of the content.
    pub fn remaining_below(&self) -> f64 {
        self.content_height - self.viewport_height - self.target_offset
    }
}

/// Semantic scroll position.
///
/// Preserves intent across relayout: `AtRow` keeps the same row on top
/// even when rows above it change height.
///
/// # Clamping Behavior
/// Every variant resolves into `[0, max(0, content - viewport)]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScrollPosition {
    /// Offset 0.
    #[default]
    Top,
    /// Last page of content.
    Bottom,
    /// Absolute offset from the top.
    AtOffset(f64),
    /// Keep a row at the top of the viewport.
    AtRow {
        /// Row index.
        index: usize,
        /// Offset inside that row.
        within: f64,
    },
}

impl ScrollPosition {
    /// Resolve to an absolute offset.
    ///
    /// `row_offset` maps a row index to its top edge; indices past the end
    /// resolve like [`ScrollPosition::Bottom`].
    pub fn resolve<F>(&self, content_height: f64, viewport_height: f64, row_offset: F) -> f64
    where
        F: Fn(usize) -> Option<f64>,
    {
        let max = max_offset(content_height, viewport_height);
        let raw = match *self {
            Self::Top => 0.0,
            Self::Bottom => max,
            Self::AtOffset(offset) => offset,
            Self::AtRow { index, within } => match row_offset(index) {
                Some(top) => top + within,
                None => max,
            },
        };

        if raw.is_finite() {
            raw.clamp(0.0, max)
        } else {
            0.0
        }
    }
}

fn max_offset(content_height: f64, viewport_height: f64) -> f64 {
    let max = content_height - viewport_height;
    if max.is_finite() {
        max.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(index: usize) -> Option<f64> {
        (index < 10).then(|| index as f64 * 100.0)
    }

    #[test]
    fn default_is_top() {
        assert_eq!(ScrollPosition::default(), ScrollPosition::Top);
    }

    #[test]
    fn bottom_resolves_to_last_page() {
        assert_eq!(ScrollPosition::Bottom.resolve(1000.0, 300.0, rows), 700.0);
    }

    #[test]
    fn short_content_always_resolves_to_zero() {
        assert_eq!(ScrollPosition::Bottom.resolve(100.0, 300.0, rows), 0.0);
        assert_eq!(
            ScrollPosition::AtOffset(50.0).resolve(100.0, 300.0, rows),
            0.0
        );
    }

    #[test]
    fn offsets_are_clamped() {
        assert_eq!(
            ScrollPosition::AtOffset(-20.0).resolve(1000.0, 300.0, rows),
            0.0
        );
        assert_eq!(
            ScrollPosition::AtOffset(5000.0).resolve(1000.0, 300.0, rows),
            700.0
        );
        assert_eq!(
            ScrollPosition::AtOffset(f64::NAN).resolve(1000.0, 300.0, rows),
            0.0
        );
    }

    #[test]
    fn at_row_uses_row_top() {
        let pos = ScrollPosition::AtRow {
            index: 3,
            within: 10.0,
        };
        assert_eq!(pos.resolve(1000.0, 300.0, rows), 310.0);
    }

    #[test]
    fn at_row_past_end_resolves_to_bottom() {
        let pos = ScrollPosition::AtRow {
            index: 42,
            within: 0.0,
        };
        assert_eq!(pos.resolve(1000.0, 300.0, rows), 700.0);
    }

    #[test]
    fn metrics_remaining_below() {
        let metrics = ScrollMetrics::new(1000.0, 300.0, 200.0);
        assert_eq!(metrics.max_offset(), 700.0);
        assert_eq!(metrics.remaining_below(), 500.0);
    }
}
