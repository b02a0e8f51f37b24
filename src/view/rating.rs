//! Rating glyph rendering.

use crate::model::MAX_RATING;
use crate::view_state::types::Size;

/// A rendered rating with its natural size.
///
/// The size is independent of the rating value so every row lines up.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedGlyph {
    filled: u8,
    total: u8,
    size: Size,
}

impl RenderedGlyph {
    /// Create a glyph description.
    pub fn new(filled: u8, total: u8, size: Size) -> Self {
        Self {
            filled: filled.min(total),
            total,
            size,
        }
    }

    /// Number of filled stars.
    pub fn filled(&self) -> u8 {
        self.filled
    }

    /// Total number of stars drawn.
    pub fn total(&self) -> u8 {
        self.total
    }

    /// Natural size of the glyph.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Text rendition, e.g. `★★★☆☆`.
    pub fn to_text(&self) -> String {
        let filled = usize::from(self.filled);
        let empty = usize::from(self.total - self.filled);
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

/// Rating-to-visual collaborator.
pub trait RatingRenderer: Send + Sync {
    /// Render a validated rating.
    fn render(&self, rating: u8) -> RenderedGlyph;
}

/// Draws `MAX_RATING` stars in a row, the first `rating` of them filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarRatingRenderer {
    star_size: f64,
    spacing: f64,
}

impl StarRatingRenderer {
    /// Create a renderer with the given star edge and inter-star spacing.
    pub fn new(star_size: f64, spacing: f64) -> Self {
        Self {
            star_size: star_size.max(0.0),
            spacing: spacing.max(0.0),
        }
    }

    fn glyph_size(&self) -> Size {
        let count = f64::from(MAX_RATING);
        Size::new(
            count * self.star_size + (count - 1.0) * self.spacing,
            self.star_size,
        )
    }
}

impl Default for StarRatingRenderer {
    fn default() -> Self {
        Self::new(16.0, 1.0)
    }
}

impl RatingRenderer for StarRatingRenderer {
    fn render(&self, rating: u8) -> RenderedGlyph {
        RenderedGlyph::new(rating, MAX_RATING, self.glyph_size())
    }
}
