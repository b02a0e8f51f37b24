//! Layout dimension constants for review rows.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

use crate::view_state::types::{EdgeInsets, Size};

/// Insets from the row edges to its content (top 9, left 12, bottom 9, right 12).
pub const ROW_INSETS: EdgeInsets = EdgeInsets::new(9.0, 12.0, 9.0, 12.0);

/// Avatar square.
pub const AVATAR_SIZE: Size = Size::new(36.0, 36.0);

/// Horizontal gap between the avatar and the text column.
pub const AVATAR_TO_USERNAME_SPACING: f64 = 10.0;

/// Vertical gap from the author name to the rating glyph.
pub const USERNAME_TO_RATING_SPACING: f64 = 6.0;

/// Vertical gap from the rating glyph to the body text when no photos are shown.
pub const RATING_TO_TEXT_SPACING: f64 = 6.0;

/// Vertical gap from the rating glyph to the photo strip.
pub const RATING_TO_PHOTOS_SPACING: f64 = 10.0;

/// Vertical gap from the photo strip to the body text.
pub const PHOTOS_TO_TEXT_SPACING: f64 = 10.0;

/// Vertical gap from the body text to the toggle affordance.
pub const TEXT_TO_TOGGLE_SPACING: f64 = 6.0;

/// Vertical gap above the timestamp, whatever precedes it.
pub const CREATED_SPACING: f64 = 6.0;

/// Size of a single photo tile.
pub const PHOTO_SIZE: Size = Size::new(55.0, 66.0);

/// Horizontal gap between photo tiles.
pub const PHOTO_SPACING: f64 = 8.0;

/// Default number of photo tiles shown per review.
pub const DEFAULT_MAX_PHOTOS: usize = 5;

/// Default line cap for collapsed review text.
pub const DEFAULT_COLLAPSED_LINES: usize = 3;

/// Left edge of the text column.
pub const fn text_column_left() -> f64 {
    ROW_INSETS.left + AVATAR_SIZE.width + AVATAR_TO_USERNAME_SPACING
}

/// Width of a photo strip holding `count` tiles.
pub fn photo_strip_width(count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    n * PHOTO_SIZE.width + (n - 1.0) * PHOTO_SPACING
}
