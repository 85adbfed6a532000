use crate::key::KeyMap;
use crate::{CacheKey, CellBox, Direction, Extent, Frame, Position, RowLayout};

/// Computes the box of cell `(row, column)`.
///
/// Cells are positioned relative to their row: `top = 0`, `bottom = 0`, and the column offset
/// (plus the horizontal adjustment) on the `left` or `right` side depending on the frame's
/// direction. Cells that the frame's measurement registry has not measured yet get an auto-sized
/// placeholder anchored at the row's start instead, so measurement sees an unconstrained box.
pub fn cell_box(frame: &Frame<'_>, row: usize, column: usize) -> CellBox {
    if !frame.is_measured(row, column) {
        return placeholder_box(frame.direction);
    }

    let datum = frame.columns.size_and_position(column);
    let offset = adjusted(datum.offset, frame.adjustment.horizontal);
    let (left, right) = inline_sides(frame.direction, offset);
    CellBox {
        position: Position::Absolute,
        top: Some(0),
        bottom: Some(0),
        left,
        right,
        width: Some(Extent::Px(datum.size)),
        height: None,
    }
}

/// Computes the box of a row.
///
/// [`RowLayout::Positioned`] rows are absolutely positioned inside the grid at their (adjusted)
/// offset. [`RowLayout::Flowed`] rows only carry their height and stack in document order.
/// Rows never get placeholder boxes.
pub fn row_box(frame: &Frame<'_>, row: usize, layout: RowLayout) -> CellBox {
    let datum = frame.rows.size_and_position(row);
    match layout {
        RowLayout::Positioned => {
            let (left, right) = inline_sides(frame.direction, 0);
            CellBox {
                position: Position::Absolute,
                top: Some(adjusted(datum.offset, frame.adjustment.vertical)),
                bottom: None,
                left,
                right,
                width: None,
                height: Some(Extent::Px(datum.size)),
            }
        }
        RowLayout::Flowed => CellBox {
            position: Position::Relative,
            height: Some(Extent::Px(datum.size)),
            ..CellBox::default()
        },
    }
}

/// The box of a cell whose size is not known yet.
pub fn placeholder_box(direction: Direction) -> CellBox {
    let (left, right) = inline_sides(direction, 0);
    CellBox {
        position: Position::Absolute,
        top: Some(0),
        bottom: None,
        left,
        right,
        width: Some(Extent::Auto),
        height: Some(Extent::Auto),
    }
}

fn inline_sides(direction: Direction, offset: i64) -> (Option<i64>, Option<i64>) {
    match direction {
        Direction::Ltr => (Some(offset), None),
        Direction::Rtl => (None, Some(offset)),
    }
}

fn adjusted(offset: u64, adjustment: i64) -> i64 {
    i64::try_from(offset)
        .unwrap_or(i64::MAX)
        .saturating_add(adjustment)
}

/// Remembers computed boxes by key so equal inputs produce the very same box across passes.
///
/// Entries are only read and written when the frame allows it (see
/// [`Frame::can_cache_style`]). Placeholder boxes are never stored: once the cell is measured
/// its real box must take over.
#[derive(Clone, Debug, Default)]
pub struct StyleCache {
    entries: KeyMap<CellBox>,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<CellBox> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: CacheKey, style: CellBox) {
        self.entries.insert(key, style);
    }

    pub fn remove(&mut self, key: &CacheKey) -> Option<CellBox> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached box for `key`, or computes it.
    ///
    /// With `can_cache == false` the cache is neither read nor written.
    pub(crate) fn resolve(
        &mut self,
        key: CacheKey,
        can_cache: bool,
        compute: impl FnOnce() -> CellBox,
    ) -> CellBox {
        if !can_cache {
            return compute();
        }
        if let Some(hit) = self.entries.get(&key) {
            return *hit;
        }
        let style = compute();
        if !style.is_placeholder() {
            self.entries.insert(key, style);
        }
        style
    }
}
