//! A headless visible-range rendering engine for virtualized two-dimensional grids.
//!
//! For adapter-level utilities (scroll phase tracking, measurements, a grid controller), see the
//! `gridrange-adapter` crate.
//!
//! Given the window of rows and columns a viewport currently needs (including overscan), this
//! crate decides which cells to materialize, computes the on-screen box of each one, and decides
//! when previously rendered output can be reused instead of calling the renderer again:
//!
//! - boxes are cached by key while the grid is idle, so equal inputs keep the very same box;
//! - rendered cells and rows are cached by key while a scroll gesture is in flight, and the cache
//!   is dropped as soon as scrolling stops;
//! - neither cache is used while offsets are compressed or adjusted.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the materialized and visible index windows, and the scroll phase
//! - a size/position oracle per axis (see [`AxisSizes`] for a ready-made one)
//! - a cell renderer, and optionally a row renderer
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod axis;
mod cell_range;
mod fenwick;
mod frame;
mod key;
mod options;
mod output;
mod renderer;
mod row_range;
mod style;
mod types;

#[cfg(test)]
mod tests;

pub use axis::{AxisSizes, MeasurementRegistry, SizeAndPositionOracle};
pub use cell_range::{CellParams, CellRangeScope};
pub use frame::Frame;
pub use key::CacheKey;
pub use options::{CellRangeRenderer, CellRenderer, RendererOptions, RowLayout, RowRenderer};
pub use output::{OutputCache, Positioned};
pub use renderer::GridRangeRenderer;
pub use row_range::{RowContainer, RowParams};
pub use style::{StyleCache, cell_box, placeholder_box, row_box};
pub use types::{
    CellBox, Direction, Extent, IndexRange, OffsetAdjustment, Position, ScrollPhase,
    SizeAndPosition, Window,
};
