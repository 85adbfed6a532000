use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<V> = HashMap<CacheKey, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<V> = BTreeMap<CacheKey, V>;

/// A stable identity for a rendered cell or row.
///
/// Keys depend only on indexes (never on scroll position), and cell keys never collide with row
/// keys. The `Display` form matches the element keys a DOM-like host would use:
/// `"{row}-{column}"` for cells and `"row-{row}"` for rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CacheKey {
    Cell { row: usize, column: usize },
    Row(usize),
}

impl CacheKey {
    pub fn cell(row: usize, column: usize) -> Self {
        Self::Cell { row, column }
    }

    pub fn row(row: usize) -> Self {
        Self::Row(row)
    }

    pub fn row_index(&self) -> usize {
        match *self {
            Self::Cell { row, .. } | Self::Row(row) => row,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell { row, column } => write!(f, "{row}-{column}"),
            Self::Row(row) => write!(f, "row-{row}"),
        }
    }
}
