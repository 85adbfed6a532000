use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::cell_range::{CellPass, render_cells};
use crate::renderer::Caches;
use crate::style::row_box;
use crate::{CacheKey, CellBox, CellRangeScope, Frame, Positioned, RendererOptions};

/// Parameters handed to the row renderer.
#[derive(Clone, Debug)]
pub struct RowParams<C> {
    pub row_index: usize,
    pub key: CacheKey,
    /// Accessibility role of the row element (`"row"`).
    pub role: &'static str,
    pub is_scrolling: bool,
    pub is_visible: bool,
    pub style: CellBox,
    /// Rendered cells in ascending column order.
    pub children: Vec<Arc<C>>,
}

/// The default row output: a positioned container around the row's cells.
#[derive(Clone, Debug, PartialEq)]
pub struct RowContainer<C> {
    pub row_index: usize,
    pub key: CacheKey,
    pub role: &'static str,
    pub style: CellBox,
    pub children: Vec<Arc<C>>,
}

impl<C> From<RowParams<C>> for RowContainer<C> {
    fn from(params: RowParams<C>) -> Self {
        Self {
            row_index: params.row_index,
            key: params.key,
            role: params.role,
            style: params.style,
            children: params.children,
        }
    }
}

impl<C> Positioned for RowContainer<C> {
    fn style(&self) -> Option<&CellBox> {
        Some(&self.style)
    }
}

pub(crate) const ROW_ROLE: &str = "row";

/// Renders every row of the frame's window, in ascending row order.
///
/// Each row is an output-cache unit: while output caching is allowed, a cached row is returned
/// as-is and neither its cells nor the row renderer run again.
pub(crate) fn render_rows<C: Positioned, R>(
    frame: &Frame<'_>,
    options: &RendererOptions<C, R>,
    caches: &mut Caches<C, R>,
) -> Vec<Arc<R>> {
    let can_cache_style = frame.can_cache_style();
    let can_cache_output = frame.can_cache_output();
    let is_scrolling = frame.is_scrolling();
    let layout = options.layout;
    let Caches {
        styles,
        cells,
        rows,
        warning,
    } = caches;

    let mut out = Vec::with_capacity(frame.window.rows.len());
    for row_index in frame.window.rows.iter() {
        let key = CacheKey::row(row_index);
        let is_visible = frame.is_row_visible(row_index);
        let style = styles.resolve(key, can_cache_style, || row_box(frame, row_index, layout));

        let row = rows.resolve(key, can_cache_output, || {
            let mut pass = CellPass {
                styles: &mut *styles,
                cells: &mut *cells,
                warning: &mut *warning,
                cell_renderer: &options.cell_renderer,
            };
            let children = match &options.cell_range_renderer {
                Some(custom) => custom(CellRangeScope::new(frame, row_index, is_visible, pass)),
                None => render_cells(frame, row_index, is_visible, frame.window.columns, &mut pass),
            };
            (options.row_renderer)(RowParams {
                row_index,
                key,
                role: ROW_ROLE,
                is_scrolling,
                is_visible,
                style,
                children,
            })
        });

        if let Some(row) = row {
            out.push(row);
        }
    }
    out
}
