use alloc::vec::Vec;
use core::cmp;

use crate::fenwick::Fenwick;
use crate::{IndexRange, SizeAndPosition};

/// Maps an index along one axis (rows or columns) to its offset and size.
pub trait SizeAndPositionOracle {
    fn size_and_position(&self, index: usize) -> SizeAndPosition;

    /// Whether offsets were compressed (e.g. because the real extent exceeds a platform limit).
    ///
    /// Boxes computed from compressed offsets are never cached.
    fn are_offsets_adjusted(&self) -> bool {
        false
    }
}

/// Answers whether a cell has a known (measured) size yet.
///
/// Cells that are not measured are given an auto-sized placeholder box.
pub trait MeasurementRegistry {
    fn has(&self, row: usize, column: usize) -> bool;
}

impl<F: Fn(usize, usize) -> bool> MeasurementRegistry for F {
    fn has(&self, row: usize, column: usize) -> bool {
        self(row, column)
    }
}

/// A size/position index over one axis, backed by prefix sums.
///
/// Offsets are never compressed, so [`SizeAndPositionOracle::are_offsets_adjusted`] is always
/// `false`. Sizes can be updated in `O(log n)` as cells get measured.
#[derive(Clone, Debug, Default)]
pub struct AxisSizes {
    sizes: Vec<u32>,
    sums: Fenwick,
}

impl AxisSizes {
    /// Creates an axis of `count` items sized by `estimate_size(i)`.
    pub fn new(count: usize, estimate_size: impl Fn(usize) -> u32) -> Self {
        Self::from_sizes((0..count).map(estimate_size).collect())
    }

    /// Creates an axis where every item has the same size.
    pub fn uniform(count: usize, size: u32) -> Self {
        Self::from_sizes(alloc::vec![size; count])
    }

    pub fn from_sizes(sizes: Vec<u32>) -> Self {
        let sums = Fenwick::from_sizes(&sizes);
        Self { sizes, sums }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn size(&self, index: usize) -> Option<u32> {
        self.sizes.get(index).copied()
    }

    /// Updates the size of one item. Returns the size delta (0 if out of range or unchanged).
    pub fn set_size(&mut self, index: usize, size: u32) -> i64 {
        let Some(cur) = self.sizes.get_mut(index) else {
            return 0;
        };
        if *cur == size {
            return 0;
        }
        let delta = size as i64 - *cur as i64;
        *cur = size;
        self.sums.add(index, delta);
        gtrace!(index, size, delta, "AxisSizes::set_size");
        delta
    }

    pub fn total_size(&self) -> u64 {
        self.sums.total()
    }

    /// Returns the index of the item containing `offset`, clamped to the last item.
    ///
    /// Returns `None` for an empty axis.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let count = self.sizes.len();
        if count == 0 {
            return None;
        }
        Some(self.sums.lower_bound(offset).min(count - 1))
    }

    /// Returns the inclusive range of items intersecting `[scroll_offset, scroll_offset +
    /// viewport_size)`.
    ///
    /// The scroll offset is clamped so the viewport never extends past the end of the axis.
    /// Returns `None` when nothing can be visible (empty axis, zero viewport, or zero extent).
    pub fn visible_range(&self, scroll_offset: u64, viewport_size: u32) -> Option<IndexRange> {
        let total = self.total_size();
        if self.sizes.is_empty() || viewport_size == 0 || total == 0 {
            return None;
        }

        let view = viewport_size as u64;
        let offset = scroll_offset.min(total.saturating_sub(view));
        let last = offset.saturating_add(view - 1).min(total - 1);

        let start = self.index_at_offset(offset)?;
        let stop = self.index_at_offset(cmp::max(last, offset))?;
        Some(IndexRange::new(start, stop))
    }
}

impl SizeAndPositionOracle for AxisSizes {
    fn size_and_position(&self, index: usize) -> SizeAndPosition {
        SizeAndPosition {
            offset: self.sums.prefix_sum(index),
            size: self.sizes.get(index).copied().unwrap_or(0),
        }
    }
}
