//! Local image fetcher.

use super::{run_detached, ImageCompletion, ImageFetcher};
use crate::model::ImageError;
use tracing::debug;
use url::Url;

/// Reads `file://` URLs from the local filesystem on a background thread.
///
/// Any other scheme fails with [`ImageError::Fetch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageFetcher;

impl FileImageFetcher {
    /// Create a fetcher.
    pub fn new() -> Self {
        Self
    }

    fn read(url: &Url) -> Result<Vec<u8>, ImageError> {
        if url.scheme() != "file" {
            return Err(ImageError::Fetch(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        let path = url
            .to_file_path()
            .map_err(|()| ImageError::Fetch(format!("not a local path: {url}")))?;
        std::fs::read(&path)
            .map_err(|e| ImageError::Fetch(format!("{}: {e}", path.display())))
    }
}

impl ImageFetcher for FileImageFetcher {
    fn fetch(&self, url: &Url, completion: ImageCompletion) {
        debug!(url = %url, "Fetching image");
        let url = url.clone();
        run_detached(
            "revlist-image-fetch",
            move || Self::read(&url),
            completion,
            |err| ImageError::Fetch(err.to_string()),
        );
    }
}
