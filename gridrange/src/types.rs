use core::cmp;

/// Horizontal layout direction.
///
/// Right-to-left grids position cells with `right` instead of `left`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Parses `"ltr"`/`"rtl"` (ASCII case-insensitive). Anything else is left-to-right.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("rtl") {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }
}

impl From<&str> for Direction {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// The caller-declared scroll state of a render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    /// A scroll gesture is in progress.
    Active,
    /// Rendered outputs are always cached, regardless of scrolling.
    OptOutAlwaysCache,
}

impl ScrollPhase {
    /// The `is_scrolling` flag handed to renderers.
    pub fn is_scrolling(self) -> bool {
        self == Self::Active
    }

    /// Whether this phase allows the rendered-output caches to be used at all.
    pub fn caches_output(self) -> bool {
        matches!(self, Self::Active | Self::OptOutAlwaysCache)
    }
}

/// An inclusive range of indexes (`start..=stop`).
///
/// A range with `start > stop` is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub start: usize,
    pub stop: usize,
}

impl IndexRange {
    pub const EMPTY: Self = Self { start: 1, stop: 0 };

    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    /// A range covering exactly one index.
    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            stop: index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.stop
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.stop - self.start).saturating_add(1)
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.stop
    }

    pub fn iter(&self) -> core::ops::RangeInclusive<usize> {
        self.start..=self.stop
    }

    /// Returns `true` if every index of `other` is also in `self`.
    ///
    /// An empty `other` is contained in any range.
    pub fn covers(&self, other: &Self) -> bool {
        other.is_empty() || (self.contains(other.start) && self.contains(other.stop))
    }

    /// Widens the range by `overscan` indexes on both sides, clamped to `[0, count - 1]`.
    pub fn overscan(&self, overscan: usize, count: usize) -> Self {
        if self.is_empty() || count == 0 {
            return Self::EMPTY;
        }
        let last = count - 1;
        Self {
            start: cmp::min(self.start.saturating_sub(overscan), last),
            stop: cmp::min(self.stop.saturating_add(overscan), last),
        }
    }
}

/// A row × column index window.
///
/// The same shape describes both the materialized window (including overscan) and the strictly
/// visible sub-range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub rows: IndexRange,
    pub columns: IndexRange,
}

impl Window {
    pub const EMPTY: Self = Self {
        rows: IndexRange::EMPTY,
        columns: IndexRange::EMPTY,
    };

    pub fn new(rows: IndexRange, columns: IndexRange) -> Self {
        Self { rows, columns }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.rows.contains(row) && self.columns.contains(column)
    }
}

/// Pixel corrections applied when an axis compresses its offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetAdjustment {
    pub horizontal: i64,
    pub vertical: i64,
}

impl OffsetAdjustment {
    pub const ZERO: Self = Self {
        horizontal: 0,
        vertical: 0,
    };

    pub fn new(horizontal: i64, vertical: i64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.horizontal == 0 && self.vertical == 0
    }
}

/// The offset and size of one index along an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeAndPosition {
    pub offset: u64,
    pub size: u32,
}

impl SizeAndPosition {
    pub fn new(offset: u64, size: u32) -> Self {
        Self { offset, size }
    }

    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}

/// A width or height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extent {
    Px(u32),
    /// Unconstrained; the content decides.
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    #[default]
    Absolute,
    Relative,
}

/// The on-screen box of a cell or row.
///
/// Only the fields that apply are set; in particular exactly one of `left`/`right` is set for
/// cells, depending on [`Direction`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellBox {
    pub position: Position,
    pub top: Option<i64>,
    pub bottom: Option<i64>,
    pub left: Option<i64>,
    pub right: Option<i64>,
    pub width: Option<Extent>,
    pub height: Option<Extent>,
}

impl CellBox {
    /// `true` for the auto-sized box given to cells that have not been measured yet.
    pub fn is_placeholder(&self) -> bool {
        self.width == Some(Extent::Auto) || self.height == Some(Extent::Auto)
    }

    /// The horizontal offset, whichever side it is anchored to.
    pub fn inline_offset(&self) -> Option<i64> {
        self.left.or(self.right)
    }
}
