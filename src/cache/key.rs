//! Cache keys.

use std::fmt;
use url::Url;

/// Stable cache key derived from a resource URL.
///
/// Built from the parsed URL, so two spellings that normalize to the same
/// URL (`HTTPS://Example.com/a` vs `https://example.com/a`) share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a raw string that is not a URL.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse `raw` as a URL and key it by its normalized form.
    ///
    /// Returns `None` when `raw` is not an absolute URL.
    pub fn parse(raw: &str) -> Option<Self> {
        Url::parse(raw).ok().map(|url| Self::from(&url))
    }

    /// Key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Url> for CacheKey {
    fn from(url: &Url) -> Self {
        Self(url.as_str().to_owned())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
