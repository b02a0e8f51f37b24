//! HeightIndex - O(log n) prefix sums and offset lookup via Fenwick tree
//!
//! Holds the cached height of every row in list order so the list host can
//! answer "how tall is the content" and "which row is at this offset"
//! without walking every row.
//!
//! # Complexity
//!
//! - `set`: O(log n)
//! - `prefix_sum`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `push`: amortized O(log n)
//! - `total`: O(log n)
//! - `height`, `len`: O(1)
//! - `truncate`: O(n)

/// Cumulative row heights backed by a Fenwick tree.
///
/// # Invariants
/// - `heights.len() == len()`
/// - `tree.len() >= heights.len()`; growing the tree rebuilds it, so
///   nodes past the old capacity never miss earlier entries
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick storage (the fenwick crate indexes it 0-based).
    tree: Vec<f64>,
    /// Height of each row, kept for exact reads and rebuilds.
    heights: Vec<f64>,
}

impl HeightIndex {
    /// Builds an index from heights in list order.
    pub fn from_heights(heights: impl IntoIterator<Item = f64>) -> Self {
        let heights: Vec<f64> = heights.into_iter().map(sanitize_height).collect();
        let mut index = Self {
            tree: vec![0.0; heights.len()],
            heights,
        };
        index.rebuild();
        index
    }

    /// Sets the height at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, height: f64) {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );

        let height = sanitize_height(height);
        let delta = height - self.heights[index];
        if delta != 0.0 {
            self.heights[index] = height;
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Height of the row at `index`, if present.
    pub fn height(&self, index: usize) -> Option<f64> {
        self.heights.get(index).copied()
    }

    /// Cumulative height up to and including `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use revlist::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([3.0, 4.0, 5.0]);
    /// assert_eq!(index.prefix_sum(0), 3.0);
    /// assert_eq!(index.prefix_sum(1), 7.0);
    /// assert_eq!(index.prefix_sum(2), 12.0);
    /// ```
    pub fn prefix_sum(&self, index: usize) -> f64 {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );

        fenwick::array::prefix_sum(&self.tree, index).max(0.0)
    }

    /// Top edge of the row at `index` (sum of all rows before it).
    ///
    /// Returns `total()` for `index == len()`.
    pub fn offset_of(&self, index: usize) -> f64 {
        if index == 0 || self.is_empty() {
            0.0
        } else {
            self.prefix_sum(index.min(self.len()) - 1)
        }
    }

    /// First index whose `prefix_sum` exceeds `offset`: the row containing
    /// that vertical offset.
    ///
    /// Returns `None` when `offset >= total()` or the index is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use revlist::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([10.0, 20.0, 15.0]);
    /// assert_eq!(index.lower_bound(0.0), Some(0));
    /// assert_eq!(index.lower_bound(10.0), Some(1));
    /// assert_eq!(index.lower_bound(29.5), Some(1));
    /// assert_eq!(index.lower_bound(45.0), None);
    /// ```
    pub fn lower_bound(&self, offset: f64) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let mut left = 0;
        let mut right = self.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > offset {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.len()).then_some(left)
    }

    /// Total height of all rows.
    pub fn total(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.prefix_sum(self.len() - 1)
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// True when no rows are indexed.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Appends a row.
    pub fn push(&mut self, height: f64) {
        let height = sanitize_height(height);
        let idx = self.heights.len();
        self.heights.push(height);

        if idx >= self.tree.len() {
            self.tree.resize(self.tree.len().max(1) * 2, 0.0);
            self.rebuild();
        } else {
            fenwick::array::update(&mut self.tree, idx, height);
        }
    }

    /// Drops every row from `len` on. No-op when `len >= len()`.
    pub fn truncate(&mut self, len: usize) {
        if len < self.heights.len() {
            self.heights.truncate(len);
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        self.tree.iter_mut().for_each(|node| *node = 0.0);
        for (idx, &height) in self.heights.iter().enumerate() {
            fenwick::array::update(&mut self.tree, idx, height);
        }
    }
}

fn sanitize_height(height: f64) -> f64 {
    if height.is_finite() {
        height.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_index() {
        let index = HeightIndex::default();
        assert_eq!(index.len(), 0);
        assert_eq!(index.total(), 0.0);
        assert!(index.is_empty());
        assert_eq!(index.lower_bound(0.0), None);
    }

    #[test]
    fn test_set_updates_height() {
        let mut index = HeightIndex::from_heights([3.0, 4.0, 5.0]);
        index.set(1, 10.0);

        assert_eq!(index.height(1), Some(10.0));
        assert_eq!(index.prefix_sum(1), 13.0);
        assert_eq!(index.total(), 18.0);
    }

    #[test]
    fn test_lower_bound_edges() {
        let index = HeightIndex::from_heights([5.0, 5.0, 5.0]);
        assert_eq!(index.lower_bound(-1.0), Some(0));
        assert_eq!(index.lower_bound(5.0), Some(1));
        assert_eq!(index.lower_bound(14.999), Some(2));
        assert_eq!(index.lower_bound(15.0), None);
    }

    #[test]
    fn test_offset_of() {
        let index = HeightIndex::from_heights([10.0, 20.0, 15.0]);
        assert_eq!(index.offset_of(0), 0.0);
        assert_eq!(index.offset_of(1), 10.0);
        assert_eq!(index.offset_of(2), 30.0);
        assert_eq!(index.offset_of(3), 45.0);
    }

    #[test]
    fn test_push_past_capacity_keeps_sums() {
        // Growth crosses several power-of-two boundaries.
        let mut index = HeightIndex::from_heights([2.0]);
        for _ in 1..37 {
            index.push(2.0);
        }
        assert_eq!(index.total(), 74.0);
        assert_eq!(index.prefix_sum(15), 32.0);
        assert_eq!(index.prefix_sum(31), 64.0);
    }

    #[test]
    fn test_invalid_heights_count_as_zero() {
        let index = HeightIndex::from_heights([f64::NAN, -4.0, 6.0]);
        assert_eq!(index.total(), 6.0);
    }

    #[test]
    fn test_truncate_then_push() {
        let mut index = HeightIndex::from_heights([5.0, 3.0, 7.0]);
        index.truncate(1);
        assert_eq!(index.len(), 1);
        assert_eq!(index.total(), 5.0);

        index.push(10.0);
        assert_eq!(index.total(), 15.0);
        assert_eq!(index.offset_of(1), 5.0);

        index.truncate(9);
        assert_eq!(index.len(), 2, "truncate past the end is a no-op");
    }

    proptest! {
        /// prefix_sum(i) == sum(heights[0..=i])
        #[test]
        fn prop_prefix_sum_is_cumulative(heights in prop::collection::vec(1u32..=100, 1..80)) {
            let mut index = HeightIndex::default();
            for &h in &heights {
                index.push(f64::from(h));
            }

            let mut expected = 0.0;
            for (i, &h) in heights.iter().enumerate() {
                expected += f64::from(h);
                prop_assert_eq!(index.prefix_sum(i), expected);
            }
        }

        /// lower_bound of any offset inside row i is i
        #[test]
        fn prop_lower_bound_finds_containing_row(heights in prop::collection::vec(1u32..=100, 1..50)) {
            let index = HeightIndex::from_heights(heights.iter().map(|&h| f64::from(h)));
            for i in 0..index.len() {
                let top = index.offset_of(i);
                prop_assert_eq!(index.lower_bound(top), Some(i));
                prop_assert_eq!(index.lower_bound(top + 0.5), Some(i));
            }
        }

        /// after set(i, h), height(i) == h and total reflects it
        #[test]
        fn prop_set_updates_height(
            heights in prop::collection::vec(1u32..=100, 1..50),
            update_index in 0usize..50,
            new_height in 1u32..=100,
        ) {
            let mut index = HeightIndex::from_heights(heights.iter().map(|&h| f64::from(h)));
            if update_index < index.len() {
                index.set(update_index, f64::from(new_height));
                prop_assert_eq!(index.height(update_index), Some(f64::from(new_height)));

                let expected: u32 = heights
                    .iter()
                    .enumerate()
                    .map(|(i, &h)| if i == update_index { new_height } else { h })
                    .sum();
                prop_assert_eq!(index.total(), f64::from(expected));
            }
        }
    }
}
