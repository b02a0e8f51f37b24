//! Materialized image payload.

use crate::model::ImageError;
use std::fmt;
use std::sync::Arc;

/// Decoded image bytes.
///
/// Immutable once built; clones share the same buffer, so a cache hit never
/// copies pixel data.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    bytes: Arc<[u8]>,
}

impl Image {
    /// Materialize an image from fetched bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::Empty`] for a zero-length payload.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, ImageError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(Self {
            bytes: Arc::from(bytes),
        })
    }

    /// Raw payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; empty payloads are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image").field("len", &self.len()).finish()
    }
}
