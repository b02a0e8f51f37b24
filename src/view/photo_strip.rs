//! Photo strip: a fixed bank of reusable photo slots.

use super::photo_slot::{ImagePolicy, LoadOutcome, PhotoSlot};
use crate::cache::ContentCache;
use crate::source::ImageFetcher;
use std::sync::Arc;

/// Up to `max_photos` slots laid out left to right.
#[derive(Debug, Clone)]
pub struct PhotoStrip {
    slots: Vec<PhotoSlot>,
}

impl PhotoStrip {
    /// Create a strip of `max_photos` hidden slots sharing one cache and
    /// fetcher.
    pub fn new(
        max_photos: usize,
        cache: Arc<ContentCache>,
        fetcher: Arc<dyn ImageFetcher>,
        policy: ImagePolicy,
    ) -> Self {
        let slots = (0..max_photos)
            .map(|_| {
                let slot =
                    PhotoSlot::new(Arc::clone(&cache), Arc::clone(&fetcher), policy.clone());
                slot.set_hidden(true);
                slot
            })
            .collect();
        Self { slots }
    }

    /// Bind the strip to a review's photo URLs.
    ///
    /// The first `min(urls.len(), max_photos)` slots are shown and asked to
    /// load; the rest are reset and hidden. Returns one outcome per shown
    /// slot.
    pub fn configure(&self, urls: &[String]) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::with_capacity(urls.len().min(self.slots.len()));
        for (i, slot) in self.slots.iter().enumerate() {
            match urls.get(i) {
                Some(url) => {
                    slot.set_hidden(false);
                    outcomes.push(slot.set_url(url));
                }
                None => {
                    slot.prepare_for_reuse();
                    slot.set_hidden(true);
                }
            }
        }
        outcomes
    }

    /// Reset every slot to a placeholder before the strip is rebound.
    pub fn prepare_for_reuse(&self) {
        for slot in &self.slots {
            slot.prepare_for_reuse();
        }
    }

    /// Number of slots currently shown.
    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_hidden()).count()
    }

    /// All slots, shown or not.
    pub fn slots(&self) -> &[PhotoSlot] {
        &self.slots
    }
}
