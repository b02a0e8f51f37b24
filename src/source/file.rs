//! JSON-document review source.
//!
//! Reads `{ "items": [...], "count": N }` once and serves `(offset, limit)`
//! slices of it from a background thread, the way a paginated endpoint
//! would. `count` defaults to the number of items.

use super::{run_detached, FetchCompletion, ReviewsSource};
use crate::model::{FetchError, RawPage, RawReview, SourceError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct ReviewDocument {
    items: Vec<RawReview>,
    #[serde(default)]
    count: Option<usize>,
}

/// Paginated view over a JSON review document.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    items: Arc<Vec<RawReview>>,
    count: usize,
    origin: Option<PathBuf>,
}

impl JsonFileSource {
    /// Load a review document from disk.
    ///
    /// # Errors
    ///
    /// - [`SourceError::FileNotFound`] if `path` does not exist
    /// - [`SourceError::Io`] if it cannot be read
    /// - [`SourceError::Parse`] if it is not a review document
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SourceError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut source = Self::from_json_str(&content).map_err(|reason| SourceError::Parse {
            path: path.to_path_buf(),
            reason,
        })?;
        source.origin = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            items = source.items.len(),
            count = source.count,
            "Loaded review document"
        );
        Ok(source)
    }

    /// Build a source from an in-memory JSON document.
    ///
    /// # Errors
    ///
    /// Returns the parser message when `json` is not a review document.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let document: ReviewDocument = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let count = document.count.unwrap_or(document.items.len());
        Ok(Self {
            items: Arc::new(document.items),
            count,
            origin: None,
        })
    }

    /// Number of raw items in the document.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total the source reports with every page.
    pub fn reported_count(&self) -> usize {
        self.count
    }

    /// File the document was read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// The page for `(offset, limit)`, computed synchronously.
    pub fn page(&self, offset: usize, limit: usize) -> RawPage {
        let start = offset.min(self.items.len());
        let end = offset.saturating_add(limit).min(self.items.len());
        RawPage {
            items: self.items[start..end].to_vec(),
            count: self.count,
        }
    }
}

impl ReviewsSource for JsonFileSource {
    fn fetch(&self, offset: usize, limit: usize, completion: FetchCompletion) {
        debug!(offset, limit, "Serving page from document");
        let source = self.clone();
        run_detached(
            "revlist-page-fetch",
            move || Ok(source.page(offset, limit)),
            completion,
            |err| FetchError::Transport(err.to_string()),
        );
    }
}
