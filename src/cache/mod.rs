//! Image materialization cache.
//!
//! - `image`: Image - immutable decoded payload
//! - `key`: CacheKey - normalized URL key
//! - `content`: ContentCache - serial-worker LRU store

pub mod content;
pub mod image;
pub mod key;

pub use content::{ContentCache, DEFAULT_CACHE_CAPACITY};
pub use image::Image;
pub use key::CacheKey;
