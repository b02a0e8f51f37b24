//! Presentation collaborators (measurement, styling, photo loading)
//!
//! Nothing here draws. These types turn content into the sizes and loaded
//! images the layout engine and the host consume.

pub mod constants;
pub mod measure;
pub mod photo_slot;
pub mod photo_strip;
pub mod rating;
pub mod styles;

pub use measure::{MonospaceMeasurer, TextMeasurer};
pub use photo_slot::{ImagePolicy, LoadOutcome, PhotoSlot, SlotContent, UrlRejection};
pub use photo_strip::PhotoStrip;
pub use rating::{RatingRenderer, RenderedGlyph, StarRatingRenderer};
pub use styles::{StyledText, TextStyle, Typography};
