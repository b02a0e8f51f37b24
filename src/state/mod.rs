//! Paging state machine and its helpers.
//!
//! - `paging`: PagingController - owns rows, issues fetches, merges pages
//! - `prefetch`: PrefetchPolicy - look-ahead trigger for the next page
//! - `row_factory`: RowFactory - records to rows

pub mod paging;
pub mod prefetch;
pub mod row_factory;

// Re-export for convenience
pub use paging::{PageState, PagingConfig, PagingController, PagingPhase, DEFAULT_PAGE_SIZE};
pub use prefetch::{should_load_next_page, PrefetchPolicy, DEFAULT_PREFETCH_SCREENS};
pub use row_factory::RowFactory;
