use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::output::MissingStyleWarning;
use crate::style::cell_box;
use crate::{
    CacheKey, CellBox, CellRenderer, Frame, IndexRange, OutputCache, Positioned, StyleCache,
};

/// Parameters handed to the cell renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellParams {
    pub row_index: usize,
    pub column_index: usize,
    pub key: CacheKey,
    pub is_scrolling: bool,
    /// `false` for overscanned cells; renderers may defer expensive work for them.
    pub is_visible: bool,
    pub style: CellBox,
}

/// The caches and renderer one row's cell pass works with.
pub(crate) struct CellPass<'s, C> {
    pub(crate) styles: &'s mut StyleCache,
    pub(crate) cells: &'s mut OutputCache<C>,
    pub(crate) warning: &'s mut MissingStyleWarning,
    pub(crate) cell_renderer: &'s CellRenderer<C>,
}

/// Renders the cells of `row_index` for `columns`, in ascending column order.
pub(crate) fn render_cells<C: Positioned>(
    frame: &Frame<'_>,
    row_index: usize,
    is_row_visible: bool,
    columns: IndexRange,
    pass: &mut CellPass<'_, C>,
) -> Vec<Arc<C>> {
    let can_cache_style = frame.can_cache_style();
    let can_cache_output = frame.can_cache_output();
    let is_scrolling = frame.is_scrolling();
    let render = pass.cell_renderer;

    let mut out = Vec::with_capacity(columns.len());
    for column_index in columns.iter() {
        let key = CacheKey::cell(row_index, column_index);
        let style = pass.styles.resolve(key, can_cache_style, || {
            cell_box(frame, row_index, column_index)
        });
        let params = CellParams {
            row_index,
            column_index,
            key,
            is_scrolling,
            is_visible: is_row_visible && frame.visible.columns.contains(column_index),
            style,
        };

        let Some(cell) = pass.cells.resolve(key, can_cache_output, || render(&params)) else {
            continue;
        };
        pass.warning.check(&*cell);
        out.push(cell);
    }
    out
}

/// Access to the built-in cell algorithm for a [`crate::CellRangeRenderer`] override.
pub struct CellRangeScope<'s, C> {
    frame: &'s Frame<'s>,
    row_index: usize,
    is_row_visible: bool,
    pass: CellPass<'s, C>,
}

impl<'s, C: Positioned> CellRangeScope<'s, C> {
    pub(crate) fn new(
        frame: &'s Frame<'s>,
        row_index: usize,
        is_row_visible: bool,
        pass: CellPass<'s, C>,
    ) -> Self {
        Self {
            frame,
            row_index,
            is_row_visible,
            pass,
        }
    }

    pub fn frame(&self) -> &Frame<'s> {
        self.frame
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn is_row_visible(&self) -> bool {
        self.is_row_visible
    }

    /// The column window of this pass.
    pub fn columns(&self) -> IndexRange {
        self.frame.window.columns
    }

    /// Renders the row's cells across the whole column window.
    pub fn render(self) -> Vec<Arc<C>> {
        let columns = self.frame.window.columns;
        self.render_columns(columns)
    }

    /// Renders the row's cells for `columns` only, with the same caching rules.
    pub fn render_columns(mut self, columns: IndexRange) -> Vec<Arc<C>> {
        render_cells(
            self.frame,
            self.row_index,
            self.is_row_visible,
            columns,
            &mut self.pass,
        )
    }
}
