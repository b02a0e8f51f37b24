//! Photo loading client: one reusable image slot.
//!
//! A slot remembers the URL it last started loading. Network results are
//! applied only if that URL is still current when they arrive; a slot that
//! was reused for another review in the meantime drops the late image. The
//! fetch itself keeps running since it cannot be aborted.

use crate::cache::{CacheKey, ContentCache, Image};
use crate::source::ImageFetcher;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};
use url::{ParseError, Url};

/// What a slot currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotContent {
    /// Shimmer/placeholder while nothing is loaded.
    #[default]
    Placeholder,
    /// A loaded image.
    Image(Image),
}

/// Result of asking a slot to show a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Same URL as the one already current; nothing started.
    Unchanged,
    /// Served from the cache synchronously.
    CacheHit,
    /// A network fetch was issued.
    Fetching,
    /// The URL was refused by the policy; the slot shows a placeholder.
    Rejected(UrlRejection),
}

/// Why a URL was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlRejection {
    /// Not a URL, even relative to the base.
    Unparsable,
    /// `http://` while insecure loads are disabled.
    Insecure,
}

/// Which photo URLs a slot may load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePolicy {
    /// Permit plain `http://` URLs.
    pub allow_insecure: bool,
    /// Base for resolving relative references.
    pub base: Option<Url>,
}

impl ImagePolicy {
    /// Resolve `raw` into a loadable URL.
    ///
    /// # Errors
    ///
    /// Returns the [`UrlRejection`] that applies.
    pub fn resolve(&self, raw: &str) -> Result<Url, UrlRejection> {
        let parsed = match Url::parse(raw) {
            Err(ParseError::RelativeUrlWithoutBase) => match &self.base {
                Some(base) => base.join(raw),
                None => Err(ParseError::RelativeUrlWithoutBase),
            },
            other => other,
        };
        let url = parsed.map_err(|_| UrlRejection::Unparsable)?;

        if url.scheme() == "http" && !self.allow_insecure {
            return Err(UrlRejection::Insecure);
        }
        Ok(url)
    }
}

#[derive(Debug, Default)]
struct SlotState {
    current_url: Option<Url>,
    content: SlotContent,
    hidden: bool,
}

/// A single image view bound to a shared cache and fetcher.
#[derive(Clone)]
pub struct PhotoSlot {
    state: Arc<Mutex<SlotState>>,
    cache: Arc<ContentCache>,
    fetcher: Arc<dyn ImageFetcher>,
    policy: ImagePolicy,
}

impl std::fmt::Debug for PhotoSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoSlot")
            .field("state", &*lock(&self.state))
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl PhotoSlot {
    /// Create an empty slot.
    pub fn new(
        cache: Arc<ContentCache>,
        fetcher: Arc<dyn ImageFetcher>,
        policy: ImagePolicy,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SlotState::default())),
            cache,
            fetcher,
            policy,
        }
    }

    /// Show the image behind `raw_url`.
    ///
    /// A repeat of the current URL is ignored. Otherwise the slot switches to
    /// a placeholder, tries the cache, and on a miss issues exactly one
    /// fetch.
    pub fn set_url(&self, raw_url: &str) -> LoadOutcome {
        let url = match self.policy.resolve(raw_url) {
            Ok(url) => url,
            Err(rejection) => {
                debug!(url = raw_url, ?rejection, "Photo URL rejected");
                self.reset();
                return LoadOutcome::Rejected(rejection);
            }
        };

        {
            let mut state = lock(&self.state);
            if state.current_url.as_ref() == Some(&url) {
                return LoadOutcome::Unchanged;
            }
            state.current_url = Some(url.clone());
            state.content = SlotContent::Placeholder;
        }

        let key = CacheKey::from(&url);
        if let Some(image) = self.cache.load(&key) {
            let mut state = lock(&self.state);
            if state.current_url.as_ref() == Some(&url) {
                state.content = SlotContent::Image(image);
            }
            trace!(url = %url, "Photo cache hit");
            return LoadOutcome::CacheHit;
        }

        let state = Arc::clone(&self.state);
        let cache = Arc::clone(&self.cache);
        let expected = url.clone();
        self.fetcher.fetch(
            &url,
            Box::new(move |result| {
                let image = match result.and_then(Image::from_bytes) {
                    Ok(image) => image,
                    Err(err) => {
                        debug!(url = %expected, error = %err, "Photo fetch failed");
                        return;
                    }
                };

                let mut state = lock(&state);
                if state.current_url.as_ref() != Some(&expected) {
                    debug!(url = %expected, "Discarding stale photo");
                    return;
                }
                cache.store(key, image.clone());
                state.content = SlotContent::Image(image);
            }),
        );
        LoadOutcome::Fetching
    }

    /// Forget the current URL and show a placeholder.
    ///
    /// Any fetch still in flight will be discarded when it lands.
    pub fn prepare_for_reuse(&self) {
        self.reset();
    }

    /// What the slot shows right now.
    pub fn content(&self) -> SlotContent {
        lock(&self.state).content.clone()
    }

    /// URL the slot last started loading.
    pub fn current_url(&self) -> Option<Url> {
        lock(&self.state).current_url.clone()
    }

    /// True when the slot shows a loaded image.
    pub fn is_loaded(&self) -> bool {
        matches!(lock(&self.state).content, SlotContent::Image(_))
    }

    /// Hide or show the slot.
    pub fn set_hidden(&self, hidden: bool) {
        lock(&self.state).hidden = hidden;
    }

    /// True when hidden.
    pub fn is_hidden(&self) -> bool {
        lock(&self.state).hidden
    }

    fn reset(&self) {
        let mut state = lock(&self.state);
        state.current_url = None;
        state.content = SlotContent::Placeholder;
    }
}

fn lock(state: &Mutex<SlotState>) -> MutexGuard<'_, SlotState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "photo_slot_tests.rs"]
mod tests;
