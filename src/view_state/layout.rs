//! Row layout engine.
//!
//! Deterministic single-pass, top-down layout of a row item at a given
//! width. The engine is pure: it owns no per-row state and the same
//! `(item, width)` always yields the same frames, which is what lets the
//! list host cache row heights.

use super::row::{ReviewRow, RowItem, SummaryRow, TextExpansionState};
use super::types::{sanitize_extent, Point, Rect};
use crate::view::constants::{
    photo_strip_width, text_column_left, AVATAR_SIZE, CREATED_SPACING, DEFAULT_COLLAPSED_LINES,
    DEFAULT_MAX_PHOTOS, PHOTOS_TO_TEXT_SPACING, PHOTO_SIZE, RATING_TO_PHOTOS_SPACING,
    RATING_TO_TEXT_SPACING, ROW_INSETS, TEXT_TO_TOGGLE_SPACING, USERNAME_TO_RATING_SPACING,
};
use crate::view::measure::TextMeasurer;
use crate::view::styles::{StyledText, Typography, HIDE_LABEL, SHOW_MORE_LABEL};
use std::fmt;
use std::sync::Arc;

/// Tolerance for "does the full text exceed the cap" comparisons.
const TRUNCATION_EPSILON: f64 = 1e-6;

/// Which label the toggle affordance shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleLabel {
    /// Offered while collapsed.
    ShowMore,
    /// Offered while expanded.
    Hide,
}

impl ToggleLabel {
    fn for_state(state: TextExpansionState) -> Self {
        match state {
            TextExpansionState::Collapsed => Self::ShowMore,
            TextExpansionState::Expanded => Self::Hide,
        }
    }
}

/// Frames of every element of a review row.
///
/// Sections that are not shown keep [`Rect::ZERO`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewLayout {
    /// Avatar square.
    pub avatar: Rect,
    /// Author name label.
    pub full_name: Rect,
    /// Rating glyph.
    pub rating: Rect,
    /// Photo strip.
    pub photos: Rect,
    /// Number of photo tiles in the strip.
    pub visible_photos: usize,
    /// Review body.
    pub body: Rect,
    /// Toggle affordance.
    pub toggle: Rect,
    /// Label of the toggle affordance; `None` when it is hidden.
    pub toggle_label: Option<ToggleLabel>,
    /// Timestamp label.
    pub created: Rect,
    /// Total row height.
    pub row_height: f64,
}

impl ReviewLayout {
    fn insets_only() -> Self {
        Self {
            avatar: Rect::ZERO,
            full_name: Rect::ZERO,
            rating: Rect::ZERO,
            photos: Rect::ZERO,
            visible_photos: 0,
            body: Rect::ZERO,
            toggle: Rect::ZERO,
            toggle_label: None,
            created: Rect::ZERO,
            row_height: ROW_INSETS.vertical(),
        }
    }

    /// True when the toggle affordance is part of the layout.
    pub fn shows_toggle(&self) -> bool {
        self.toggle_label.is_some()
    }
}

/// Frames of the summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLayout {
    /// Centered count label.
    pub label: Rect,
    /// Total row height.
    pub row_height: f64,
}

/// Layout of any row item.
#[derive(Debug, Clone, PartialEq)]
pub enum RowLayout {
    /// Layout of a review row.
    Review(ReviewLayout),
    /// Layout of the summary row.
    Summary(SummaryLayout),
}

impl RowLayout {
    /// Total row height.
    pub fn row_height(&self) -> f64 {
        match self {
            Self::Review(layout) => layout.row_height,
            Self::Summary(layout) => layout.row_height,
        }
    }

    /// Review frames, if this is a review layout.
    pub fn as_review(&self) -> Option<&ReviewLayout> {
        match self {
            Self::Review(layout) => Some(layout),
            Self::Summary(_) => None,
        }
    }
}

/// Computes row frames from measured content sizes and a width.
///
/// Cheap to clone; the measurer is shared.
#[derive(Clone)]
pub struct ItemLayoutEngine {
    measurer: Arc<dyn TextMeasurer>,
    collapsed_lines: usize,
    max_photos: usize,
    show_more: StyledText,
    hide: StyledText,
}

impl fmt::Debug for ItemLayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemLayoutEngine")
            .field("collapsed_lines", &self.collapsed_lines)
            .field("max_photos", &self.max_photos)
            .finish_non_exhaustive()
    }
}

impl ItemLayoutEngine {
    /// Create an engine with default line cap and photo count.
    pub fn new(measurer: Arc<dyn TextMeasurer>, typography: &Typography) -> Self {
        Self {
            measurer,
            collapsed_lines: DEFAULT_COLLAPSED_LINES,
            max_photos: DEFAULT_MAX_PHOTOS,
            show_more: StyledText::new(SHOW_MORE_LABEL, typography.toggle),
            hide: StyledText::new(HIDE_LABEL, typography.toggle),
        }
    }

    /// Override the collapsed line cap. 0 disables the cap.
    pub fn with_collapsed_lines(mut self, lines: usize) -> Self {
        self.collapsed_lines = lines;
        self
    }

    /// Override the maximum number of photo tiles.
    pub fn with_max_photos(mut self, max_photos: usize) -> Self {
        self.max_photos = max_photos;
        self
    }

    /// Collapsed line cap in effect.
    pub fn collapsed_lines(&self) -> usize {
        self.collapsed_lines
    }

    /// Maximum number of photo tiles in effect.
    pub fn max_photos(&self) -> usize {
        self.max_photos
    }

    /// Lay out any row item.
    pub fn compute_layout(&self, item: &RowItem, max_width: f64) -> RowLayout {
        match item {
            RowItem::Review(row) => RowLayout::Review(self.layout_review(row, max_width)),
            RowItem::Summary(row) => RowLayout::Summary(self.layout_summary(row, max_width)),
        }
    }

    /// Height of any row item at `max_width`.
    pub fn row_height(&self, item: &RowItem, max_width: f64) -> f64 {
        self.compute_layout(item, max_width).row_height()
    }

    /// Lay out a review row.
    ///
    /// Order: avatar + name, rating, photos (if any), body (if any) with
    /// its toggle (if truncation occurs), timestamp.
    pub fn layout_review(&self, row: &ReviewRow, max_width: f64) -> ReviewLayout {
        let max_width = sanitize_extent(max_width);
        if max_width <= 0.0 {
            return ReviewLayout::insets_only();
        }

        let left = text_column_left();
        let content_width = (max_width - left - ROW_INSETS.right).max(0.0);

        let avatar = Rect::new(Point::new(ROW_INSETS.left, ROW_INSETS.top), AVATAR_SIZE);

        let name_size = self
            .measurer
            .bounding_size(row.full_name(), content_width, None);
        let full_name = Rect::new(Point::new(left, ROW_INSETS.top), name_size);

        let rating = Rect::new(
            Point::new(left, full_name.max_y() + USERNAME_TO_RATING_SPACING),
            row.rating().size(),
        );
        let mut bottom = rating.max_y();

        // Photos
        let visible_photos = row.photo_urls().len().min(self.max_photos);
        let mut photos = Rect::ZERO;
        let mut gap_to_body = RATING_TO_TEXT_SPACING;
        if visible_photos > 0 {
            photos = Rect::from_xywh(
                left,
                bottom + RATING_TO_PHOTOS_SPACING,
                photo_strip_width(visible_photos),
                PHOTO_SIZE.height,
            );
            bottom = photos.max_y();
            gap_to_body = PHOTOS_TO_TEXT_SPACING;
        }

        // Body and toggle
        let mut body = Rect::ZERO;
        let mut toggle = Rect::ZERO;
        let mut toggle_label = None;
        if !row.body().is_empty() {
            let text = row.body();
            let full = self.measurer.bounding_size(text, content_width, None);
            // A cap of 0 lines means uncapped.
            let capped = self.collapsed_lines > 0;
            let cap = text.line_height() * self.collapsed_lines as f64;
            let truncates = capped && full.height > cap + TRUNCATION_EPSILON;

            let max_lines = row
                .expansion()
                .max_lines(self.collapsed_lines)
                .filter(|_| capped);
            let size = match max_lines {
                Some(lines) => self.measurer.bounding_size(
                    text,
                    content_width,
                    Some(text.line_height() * lines as f64),
                ),
                None => full,
            };
            body = Rect::new(Point::new(left, bottom + gap_to_body), size);
            bottom = body.max_y();

            if truncates {
                let label = ToggleLabel::for_state(row.expansion());
                let label_text = match label {
                    ToggleLabel::ShowMore => &self.show_more,
                    ToggleLabel::Hide => &self.hide,
                };
                toggle = Rect::new(
                    Point::new(left, bottom + TEXT_TO_TOGGLE_SPACING),
                    self.measurer.natural_size(label_text),
                );
                bottom = toggle.max_y();
                toggle_label = Some(label);
            }
        }

        // Timestamp
        let created_size = self
            .measurer
            .bounding_size(row.created(), content_width, None);
        let created = Rect::new(Point::new(left, bottom + CREATED_SPACING), created_size);
        bottom = created.max_y();

        ReviewLayout {
            avatar,
            full_name,
            rating,
            photos,
            visible_photos,
            body,
            toggle,
            toggle_label,
            created,
            row_height: bottom.max(avatar.max_y()) + ROW_INSETS.bottom,
        }
    }

    /// Lay out the summary row: one label centered in the content width.
    pub fn layout_summary(&self, row: &SummaryRow, max_width: f64) -> SummaryLayout {
        let max_width = sanitize_extent(max_width);
        if max_width <= 0.0 {
            return SummaryLayout {
                label: Rect::ZERO,
                row_height: ROW_INSETS.vertical(),
            };
        }

        let content_width = (max_width - ROW_INSETS.horizontal()).max(0.0);
        let size = self.measurer.bounding_size(row.label(), content_width, None);
        let label = Rect::new(
            Point::new(
                ROW_INSETS.left + (content_width - size.width) / 2.0,
                ROW_INSETS.top,
            ),
            size,
        );

        SummaryLayout {
            label,
            row_height: label.max_y() + ROW_INSETS.bottom,
        }
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
