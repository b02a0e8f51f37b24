//! Review records and the raw page payload they are decoded from.

use super::error::{FetchError, RecordError};
use serde::Deserialize;

/// Lowest rating a review may carry.
pub const MIN_RATING: u8 = 1;
/// Highest rating a review may carry.
pub const MAX_RATING: u8 = 5;

/// A review exactly as it appears on the wire.
///
/// Field names follow the payload (`first_name`, `photo_urls`, ...).
/// No validation happens at this level; see [`ReviewRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawReview {
    /// Author first name.
    pub first_name: String,
    /// Author last name.
    pub last_name: String,
    /// Star rating, unvalidated.
    pub rating: i64,
    /// Attached photo URLs.
    #[serde(default)]
    pub photo_urls: Vec<String>,
    /// Review body.
    #[serde(default)]
    pub text: String,
    /// Creation timestamp, already formatted for display.
    #[serde(default)]
    pub created: String,
}

/// One page of reviews as delivered by a data-fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawPage {
    /// Reviews in this page, in list order.
    pub items: Vec<RawReview>,
    /// Total number of reviews the server knows about.
    pub count: usize,
}

impl RawPage {
    /// Decode a page from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] when the payload is not a valid page.
    pub fn from_json(payload: &str) -> Result<Self, FetchError> {
        serde_json::from_str(payload).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Validate every raw review into a [`ReviewRecord`].
    ///
    /// A single invalid record makes the whole page malformed.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRecord`] naming the first bad record.
    pub fn into_records(self) -> Result<Vec<ReviewRecord>, FetchError> {
        self.items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                ReviewRecord::try_from(raw)
                    .map_err(|source| FetchError::InvalidRecord { index, source })
            })
            .collect()
    }
}

/// Immutable, validated review.
///
/// Has no identity beyond structural equality; rows derived from it carry
/// their own [`RowId`](super::RowId).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    first_name: String,
    last_name: String,
    rating: u8,
    photo_urls: Vec<String>,
    text: String,
    created: String,
}

impl ReviewRecord {
    /// Smart constructor.
    ///
    /// # Errors
    ///
    /// - [`RecordError::RatingOutOfRange`] if `rating` is outside
    ///   `MIN_RATING..=MAX_RATING`
    /// - [`RecordError::EmptyAuthor`] if both names are blank
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        rating: i64,
        photo_urls: Vec<String>,
        text: impl Into<String>,
        created: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let first_name = first_name.into();
        let last_name = last_name.into();

        let rating = u8::try_from(rating)
            .ok()
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
            .ok_or(RecordError::RatingOutOfRange {
                rating,
                min: MIN_RATING,
                max: MAX_RATING,
            })?;

        if first_name.trim().is_empty() && last_name.trim().is_empty() {
            return Err(RecordError::EmptyAuthor);
        }

        Ok(Self {
            first_name,
            last_name,
            rating,
            photo_urls,
            text: text.into(),
            created: created.into(),
        })
    }

    /// Author first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Author last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last", trimmed when one half is missing.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Validated rating in `MIN_RATING..=MAX_RATING`.
    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Photo URLs in payload order.
    pub fn photo_urls(&self) -> &[String] {
        &self.photo_urls
    }

    /// Review body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Creation timestamp string.
    pub fn created(&self) -> &str {
        &self.created
    }
}

impl TryFrom<RawReview> for ReviewRecord {
    type Error = RecordError;

    fn try_from(raw: RawReview) -> Result<Self, Self::Error> {
        Self::new(
            raw.first_name,
            raw.last_name,
            raw.rating,
            raw.photo_urls,
            raw.text,
            raw.created,
        )
    }
}
