//! Turns validated records into list rows.

use crate::model::{ReviewRecord, RowIdAllocator};
use crate::view::rating::RatingRenderer;
use crate::view::styles::{review_count_label, StyledText, Typography};
use crate::view_state::row::{ReviewRow, SummaryRow};
use std::fmt;
use std::sync::Arc;

/// Builds rows with pre-shaped text and fresh identifiers.
///
/// Identifiers come from one allocator per factory and are never reused.
pub struct RowFactory {
    typography: Typography,
    rating: Arc<dyn RatingRenderer>,
    ids: RowIdAllocator,
}

impl fmt::Debug for RowFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowFactory")
            .field("typography", &self.typography)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

impl RowFactory {
    /// Create a factory.
    pub fn new(typography: Typography, rating: Arc<dyn RatingRenderer>) -> Self {
        Self {
            typography,
            rating,
            ids: RowIdAllocator::new(),
        }
    }

    /// Styles in use.
    pub fn typography(&self) -> &Typography {
        &self.typography
    }

    /// A collapsed review row for `record`.
    pub fn make_review(&mut self, record: &ReviewRecord) -> ReviewRow {
        let t = &self.typography;
        ReviewRow::new(
            self.ids.allocate(),
            StyledText::new(record.full_name(), t.username),
            self.rating.render(record.rating()),
            record.photo_urls().to_vec(),
            StyledText::new(record.text(), t.body),
            StyledText::new(record.created(), t.created),
        )
    }

    /// The footer row for `total` reviews.
    pub fn make_summary(&self, total: usize) -> SummaryRow {
        SummaryRow::new(
            total,
            StyledText::new(review_count_label(total), self.typography.review_count),
        )
    }
}
