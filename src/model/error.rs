//! Error types for the review list core.
//!
//! The taxonomy is deliberately shallow. Nothing in the core is fatal:
//!
//! - [`FetchError`] - transport or decode failure of a page. Recovered by the
//!   paging controller, which logs it and re-enables retry.
//! - [`RecordError`] - a single decoded review violates the record contract.
//!   Converted into [`FetchError::InvalidRecord`] so the whole page counts as
//!   malformed.
//! - [`ImageError`] - an image payload could not be materialized. Swallowed
//!   by the photo client, which keeps showing its placeholder.
//! - [`SourceError`] - a concrete data source could not be opened. Only the
//!   binary sees this.
//! - [`CacheError`] - the image cache worker could not be started.
//!
//! [`AppError`] is the binary's top-level error and wraps the others via
//! `From` so `?` composes in `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error returned by the `revlist` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The review data source could not be opened.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// The image cache could not be started.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Failure delivered by a data-fetch collaborator.
///
/// Cloneable so a single failure can be logged and forwarded without
/// re-allocating the underlying I/O error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The transport failed before a payload was received.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// A payload was received but could not be decoded.
    #[error("Malformed payload: {0}")]
    Decode(String),

    /// The payload decoded but one of its records is invalid.
    #[error("Invalid record at index {index}: {source}")]
    InvalidRecord {
        /// Position of the offending record within the page.
        index: usize,
        /// What was wrong with it.
        #[source]
        source: RecordError,
    },
}

/// A decoded review that violates the record contract.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Rating outside the supported range.
    #[error("rating {rating} outside {min}..={max}")]
    RatingOutOfRange {
        /// The rating that was received.
        rating: i64,
        /// Lowest accepted rating.
        min: u8,
        /// Highest accepted rating.
        max: u8,
    },

    /// Both first and last name are blank.
    #[error("author name is empty")]
    EmptyAuthor,
}

/// An image payload could not be turned into an [`Image`](crate::cache::Image).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageError {
    /// The fetch returned zero bytes.
    #[error("image payload is empty")]
    Empty,

    /// The image could not be fetched at all.
    #[error("image fetch failed: {0}")]
    Fetch(String),
}

/// The content cache worker could not be started.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Spawning the worker thread failed.
    #[error("failed to spawn cache worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

/// Failure opening a concrete review source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The source file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source file is not a valid review document.
    #[error("Invalid review document {path}: {reason}")]
    Parse {
        /// Path with invalid content.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}
