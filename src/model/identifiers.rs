//! Row identifier newtype.

use std::fmt;

/// Stable identifier of a review row.
///
/// Assigned once when the row is created and never reused by the allocator
/// that produced it, so a stale identifier can never address a newer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    /// Wrap a raw identifier value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Monotonic allocator for [`RowId`]s.
#[derive(Debug, Default)]
pub struct RowIdAllocator {
    next: u64,
}

impl RowIdAllocator {
    /// Create an allocator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next unused identifier.
    pub fn allocate(&mut self) -> RowId {
        let id = RowId(self.next);
        self.next += 1;
        id
    }
}
