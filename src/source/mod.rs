//! Inbound collaborators: review pages and image bytes.
//!
//! Both collaborators are asynchronous and report through a one-shot
//! completion that may run on any thread. Neither supports cancellation;
//! callers that move on simply ignore late results.
//!
//! - `file`: JsonFileSource - serves pages from a JSON document
//! - `images`: FileImageFetcher - reads `file://` image URLs

use crate::model::{FetchError, ImageError, RawPage};
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use tracing::warn;
use url::Url;

pub mod file;
pub mod images;

pub use file::JsonFileSource;
pub use images::FileImageFetcher;

/// One-shot completion for a page fetch.
pub type FetchCompletion = Box<dyn FnOnce(Result<RawPage, FetchError>) + Send>;

/// One-shot completion for an image fetch.
pub type ImageCompletion = Box<dyn FnOnce(Result<Vec<u8>, ImageError>) + Send>;

/// Data-fetch collaborator.
///
/// # Contract
/// - `completion` is invoked exactly once, possibly on another thread
/// - Must not invoke `completion` while holding locks the caller may need
pub trait ReviewsSource: Send + Sync {
    /// Fetch up to `limit` reviews starting at `offset`.
    fn fetch(&self, offset: usize, limit: usize, completion: FetchCompletion);
}

/// Image-fetch collaborator.
///
/// # Contract
/// - `completion` is invoked exactly once, possibly on another thread
/// - Not cancellable
pub trait ImageFetcher: Send + Sync {
    /// Fetch the raw bytes behind `url`.
    fn fetch(&self, url: &Url, completion: ImageCompletion);
}

/// Run `job` on a named background thread and hand its result to
/// `completion`.
///
/// If the thread cannot be spawned, `completion` still runs (on the calling
/// thread) with the error built by `on_spawn_error`.
pub(crate) fn run_detached<T, E, J, F>(
    name: &str,
    job: J,
    completion: Box<dyn FnOnce(Result<T, E>) + Send>,
    on_spawn_error: F,
) where
    T: Send + 'static,
    E: Send + 'static,
    J: FnOnce() -> Result<T, E> + Send + 'static,
    F: FnOnce(io::Error) -> E,
{
    let slot = Arc::new(Mutex::new(Some(completion)));
    let worker_slot = Arc::clone(&slot);

    let spawned = thread::Builder::new().name(name.to_string()).spawn(move || {
        let result = job();
        let done = worker_slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(done) = done {
            done(result);
        }
    });

    if let Err(err) = spawned {
        warn!(thread = name, error = %err, "Failed to spawn background fetch");
        let done = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(done) = done {
            done(Err(on_spawn_error(err)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn run_detached_delivers_job_result() {
        let (tx, rx) = mpsc::channel();
        run_detached(
            "test-job",
            || Ok::<_, String>(42),
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
            |err| err.to_string(),
        );
        assert_eq!(rx.recv().expect("completion ran"), Ok(42));
    }

    #[test]
    fn run_detached_runs_off_the_calling_thread() {
        let caller = thread::current().id();
        let (tx, rx) = mpsc::channel();
        run_detached(
            "test-thread",
            move || Ok::<_, String>(thread::current().id()),
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
            |err| err.to_string(),
        );
        let worker = rx.recv().expect("completion ran").expect("job ok");
        assert_ne!(worker, caller);
    }
}
