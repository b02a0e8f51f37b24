//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod review;

// Re-export for convenience
pub use error::{AppError, CacheError, FetchError, ImageError, RecordError, SourceError};
pub use identifiers::{RowId, RowIdAllocator};
pub use review::{RawPage, RawReview, ReviewRecord, MAX_RATING, MIN_RATING};
