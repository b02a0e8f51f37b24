//! View-state layer - geometry, row items, layout and the list host cache
//!
//! # Module Structure
//!
//! - `types`: Geometry newtypes (Point, Size, Rect, EdgeInsets)
//! - `row`: RowItem sum type and per-row expansion state
//! - `layout`: ItemLayoutEngine - pure row layout at a width
//! - `height_index`: HeightIndex - O(log n) prefix sums via Fenwick tree
//! - `scroll`: ScrollPosition and ScrollMetrics
//! - `visible_range`: VisibleRange - rows intersecting the viewport
//! - `list`: ReviewListViewState - cached heights and scroll state

pub mod height_index;
pub mod layout;
pub mod list;
pub mod row;
pub mod scroll;
pub mod types;
pub mod visible_range;
