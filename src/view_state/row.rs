//! Row items: the addressable entries of the review list.

use crate::model::RowId;
use crate::view::rating::RenderedGlyph;
use crate::view::styles::StyledText;
use std::sync::Arc;

/// Immutable share of the ordered row sequence handed to observers.
pub type RowsSnapshot = Arc<Vec<RowItem>>;

/// Whether a review's body is line-capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextExpansionState {
    /// Body capped to the collapsed line count.
    #[default]
    Collapsed,
    /// Body shown in full.
    Expanded,
}

impl TextExpansionState {
    /// Line cap for this state; `None` means uncapped.
    pub fn max_lines(self, collapsed_lines: usize) -> Option<usize> {
        match self {
            Self::Collapsed => Some(collapsed_lines),
            Self::Expanded => None,
        }
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    /// True when expanded.
    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

/// A review with its pre-shaped content and presentation state.
///
/// Only [`ReviewRow::toggle_expansion`] mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    id: RowId,
    full_name: StyledText,
    rating: RenderedGlyph,
    photo_urls: Vec<String>,
    body: StyledText,
    created: StyledText,
    expansion: TextExpansionState,
}

impl ReviewRow {
    /// Create a collapsed review row.
    pub fn new(
        id: RowId,
        full_name: StyledText,
        rating: RenderedGlyph,
        photo_urls: Vec<String>,
        body: StyledText,
        created: StyledText,
    ) -> Self {
        Self {
            id,
            full_name,
            rating,
            photo_urls,
            body,
            created,
            expansion: TextExpansionState::Collapsed,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Author name.
    pub fn full_name(&self) -> &StyledText {
        &self.full_name
    }

    /// Rating glyph.
    pub fn rating(&self) -> &RenderedGlyph {
        &self.rating
    }

    /// Photo URLs in payload order (not truncated to the visible maximum).
    pub fn photo_urls(&self) -> &[String] {
        &self.photo_urls
    }

    /// Review body.
    pub fn body(&self) -> &StyledText {
        &self.body
    }

    /// Creation timestamp.
    pub fn created(&self) -> &StyledText {
        &self.created
    }

    /// Current expansion state.
    pub fn expansion(&self) -> TextExpansionState {
        self.expansion
    }

    /// Flip collapsed/expanded and return the new state.
    pub fn toggle_expansion(&mut self) -> TextExpansionState {
        self.expansion = self.expansion.toggled();
        self.expansion
    }
}

/// The trailing "N reviews" footer.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    total: usize,
    label: StyledText,
}

impl SummaryRow {
    /// Create a footer for `total` reviews.
    pub fn new(total: usize, label: StyledText) -> Self {
        Self { total, label }
    }

    /// Server-reported total.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Rendered label.
    pub fn label(&self) -> &StyledText {
        &self.label
    }
}

/// One entry of the rendered list.
///
/// A sum type dispatched by the list host; layout lives in
/// [`ItemLayoutEngine`](super::layout::ItemLayoutEngine), not here.
#[derive(Debug, Clone, PartialEq)]
pub enum RowItem {
    /// A review.
    Review(ReviewRow),
    /// The trailing total-count footer.
    Summary(SummaryRow),
}

impl RowItem {
    /// Review payload, if this is a review row.
    pub fn as_review(&self) -> Option<&ReviewRow> {
        match self {
            Self::Review(row) => Some(row),
            Self::Summary(_) => None,
        }
    }

    /// Mutable review payload, if this is a review row.
    pub fn as_review_mut(&mut self) -> Option<&mut ReviewRow> {
        match self {
            Self::Review(row) => Some(row),
            Self::Summary(_) => None,
        }
    }

    /// Footer payload, if this is the summary row.
    pub fn as_summary(&self) -> Option<&SummaryRow> {
        match self {
            Self::Summary(row) => Some(row),
            Self::Review(_) => None,
        }
    }

    /// True for the summary row.
    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summary(_))
    }
}
