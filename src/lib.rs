//! Review list core (revlist)
//!
//! Headless core of a paginated, infinitely scrolling review list:
//!
//! - [`view_state::layout::ItemLayoutEngine`] computes deterministic row
//!   frames and heights for a given width.
//! - [`state::PagingController`] fetches pages from a
//!   [`source::ReviewsSource`], merges them into rows and keeps a trailing
//!   summary row.
//! - [`cache::ContentCache`] is a thread-safe image cache used by the photo
//!   client in [`view::photo_slot`].
//!
//! The library never draws anything. A host (the `revlist` binary, or a UI
//! toolkit) drives it with widths, scroll positions and taps.

pub mod cache;
pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
