use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use gridrange::{CacheKey, MeasurementRegistry};

#[cfg(feature = "std")]
type MeasureMap = HashMap<CacheKey, CellSize>;
#[cfg(not(feature = "std"))]
type MeasureMap = BTreeMap<CacheKey, CellSize>;

/// Measured extents per row (heights) or per column (widths), as a multiset so the maximum
/// survives removals.
#[cfg(feature = "std")]
type ExtentMap = HashMap<usize, BTreeMap<u32, usize>>;
#[cfg(not(feature = "std"))]
type ExtentMap = BTreeMap<usize, BTreeMap<u32, usize>>;

/// The measured content size of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Records which cells have been measured, and how large they turned out to be.
///
/// Passed to a render pass as its measurement registry, it makes unmeasured cells render with
/// auto-sized placeholder boxes.
#[derive(Clone, Debug, Default)]
pub struct CellMeasurements {
    cells: MeasureMap,
    row_heights: ExtentMap,
    column_widths: ExtentMap,
}

impl CellMeasurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a measurement. Returns the previous one, if any.
    pub fn record(&mut self, row: usize, column: usize, size: CellSize) -> Option<CellSize> {
        let previous = self.cells.insert(CacheKey::cell(row, column), size);
        if let Some(previous) = previous {
            remove_extent(&mut self.row_heights, row, previous.height);
            remove_extent(&mut self.column_widths, column, previous.width);
        }
        add_extent(&mut self.row_heights, row, size.height);
        add_extent(&mut self.column_widths, column, size.width);
        previous
    }

    pub fn get(&self, row: usize, column: usize) -> Option<CellSize> {
        self.cells.get(&CacheKey::cell(row, column)).copied()
    }

    /// Forgets one cell so it is measured again.
    pub fn clear_cell(&mut self, row: usize, column: usize) -> Option<CellSize> {
        let removed = self.cells.remove(&CacheKey::cell(row, column))?;
        remove_extent(&mut self.row_heights, row, removed.height);
        remove_extent(&mut self.column_widths, column, removed.width);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.row_heights.clear();
        self.column_widths.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The tallest measured cell of `row`.
    pub fn max_height_in_row(&self, row: usize) -> Option<u32> {
        max_extent(&self.row_heights, row)
    }

    /// The widest measured cell of `column`.
    pub fn max_width_in_column(&self, column: usize) -> Option<u32> {
        max_extent(&self.column_widths, column)
    }
}

fn add_extent(map: &mut ExtentMap, index: usize, extent: u32) {
    *map.entry(index).or_default().entry(extent).or_insert(0) += 1;
}

fn remove_extent(map: &mut ExtentMap, index: usize, extent: u32) {
    let Some(extents) = map.get_mut(&index) else {
        return;
    };
    if let Some(count) = extents.get_mut(&extent) {
        *count -= 1;
        if *count == 0 {
            extents.remove(&extent);
        }
    }
    if extents.is_empty() {
        map.remove(&index);
    }
}

fn max_extent(map: &ExtentMap, index: usize) -> Option<u32> {
    map.get(&index)?.last_key_value().map(|(extent, _)| *extent)
}

impl MeasurementRegistry for CellMeasurements {
    fn has(&self, row: usize, column: usize) -> bool {
        self.cells.contains_key(&CacheKey::cell(row, column))
    }
}
