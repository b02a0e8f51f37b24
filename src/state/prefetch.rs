//! Prefetch trigger: when to ask for the next page.

use crate::view_state::scroll::ScrollMetrics;

/// Default look-ahead, in viewport heights.
pub const DEFAULT_PREFETCH_SCREENS: f64 = 2.5;

/// Look-ahead threshold for loading the next page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrefetchPolicy {
    screens: f64,
}

impl PrefetchPolicy {
    /// Policy with a look-ahead of `screens` viewports.
    ///
    /// Negative or non-finite values fall back to the default.
    pub fn new(screens: f64) -> Self {
        let screens = if screens.is_finite() && screens >= 0.0 {
            screens
        } else {
            DEFAULT_PREFETCH_SCREENS
        };
        Self { screens }
    }

    /// Look-ahead in viewport heights.
    pub fn screens(&self) -> f64 {
        self.screens
    }

    /// True when the viewport will settle within the look-ahead distance of
    /// the end of the content.
    pub fn should_load_next_page(&self, metrics: &ScrollMetrics) -> bool {
        should_load_next_page(metrics, self.screens)
    }
}

impl Default for PrefetchPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PREFETCH_SCREENS)
    }
}

/// `content - viewport - target <= viewport * screens`
pub fn should_load_next_page(metrics: &ScrollMetrics, screens: f64) -> bool {
    metrics.remaining_below() <= metrics.viewport_height * screens
}
