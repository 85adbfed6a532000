use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::cell_range::{CellPass, render_cells};
use crate::output::MissingStyleWarning;
use crate::row_range::render_rows;
use crate::{
    CellRangeScope, Direction, Frame, OutputCache, Positioned, RendererOptions, RowContainer,
    ScrollPhase, StyleCache,
};

pub(crate) struct Caches<C, R> {
    pub(crate) styles: StyleCache,
    pub(crate) cells: OutputCache<C>,
    pub(crate) rows: OutputCache<R>,
    pub(crate) warning: MissingStyleWarning,
}

impl<C, R> Default for Caches<C, R> {
    fn default() -> Self {
        Self {
            styles: StyleCache::new(),
            cells: OutputCache::new(),
            rows: OutputCache::new(),
            warning: MissingStyleWarning::default(),
        }
    }
}

/// The visible-range renderer of one grid instance.
///
/// This type owns everything that survives between render passes: the style cache, the cell
/// and row output caches, and the one-shot missing-style diagnostic. Everything else is read
/// from the [`Frame`] of each pass.
///
/// Cache lifecycle:
/// - Output caches are only used while the frame's phase allows it, and are dropped as soon as
///   a pass arrives in a phase that does not (the scroll gesture ended), or on
///   [`GridRangeRenderer::end_scroll`].
/// - The style cache persists. It is dropped when the direction or row layout changes (which
///   also drops the output caches), and on [`GridRangeRenderer::invalidate_styles`], which hosts
///   call after sizes change.
pub struct GridRangeRenderer<C, R = RowContainer<C>> {
    options: RendererOptions<C, R>,
    caches: Caches<C, R>,
    last_phase: ScrollPhase,
    last_direction: Option<Direction>,
}

impl<C: Positioned, R> GridRangeRenderer<C, R> {
    pub fn new(options: RendererOptions<C, R>) -> Self {
        gdebug!(layout = ?options.layout, "GridRangeRenderer::new");
        Self {
            options,
            caches: Caches::default(),
            last_phase: ScrollPhase::Idle,
            last_direction: None,
        }
    }

    pub fn options(&self) -> &RendererOptions<C, R> {
        &self.options
    }

    /// Replaces the options.
    ///
    /// A layout change drops every cache; a renderer change drops the output caches.
    pub fn set_options(&mut self, options: RendererOptions<C, R>) {
        let layout_changed = self.options.layout != options.layout;
        let renderers_changed = !self.options.same_renderers(&options);
        self.options = options;
        gtrace!(
            layout = ?self.options.layout,
            layout_changed,
            renderers_changed,
            "GridRangeRenderer::set_options"
        );

        if layout_changed {
            self.invalidate_styles();
            self.clear_outputs();
        }
        if renderers_changed {
            self.clear_outputs();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut RendererOptions<C, R>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    /// Renders the frame's full window: one output per rendered row, in ascending row order.
    pub fn render(&mut self, frame: &Frame<'_>) -> Vec<Arc<R>> {
        self.begin_pass(frame);
        gtrace!(
            rows = frame.window.rows.len(),
            columns = frame.window.columns.len(),
            phase = ?frame.phase,
            "GridRangeRenderer::render"
        );
        render_rows(frame, &self.options, &mut self.caches)
    }

    /// Renders the cells of a single row across the frame's column window.
    ///
    /// This is the row-major building block: the host positions the row itself. Cells follow
    /// the same style and output caching rules as in [`GridRangeRenderer::render`], and the
    /// cell-range override (if any) is applied.
    pub fn render_row_cells(&mut self, frame: &Frame<'_>, row_index: usize) -> Vec<Arc<C>> {
        self.begin_pass(frame);
        let is_row_visible = frame.is_row_visible(row_index);
        let Caches {
            styles,
            cells,
            warning,
            ..
        } = &mut self.caches;
        let mut pass = CellPass {
            styles,
            cells,
            warning,
            cell_renderer: &self.options.cell_renderer,
        };
        match &self.options.cell_range_renderer {
            Some(custom) => custom(CellRangeScope::new(frame, row_index, is_row_visible, pass)),
            None => render_cells(
                frame,
                row_index,
                is_row_visible,
                frame.window.columns,
                &mut pass,
            ),
        }
    }

    /// Ends the current output-cache epoch: cached cells and rows are dropped.
    pub fn end_scroll(&mut self) {
        self.clear_outputs();
        self.last_phase = ScrollPhase::Idle;
    }

    /// Drops cached cells and rows without ending the current epoch.
    ///
    /// Call this when cached output was rendered from data or sizes that are now stale.
    pub fn invalidate_outputs(&mut self) {
        self.clear_outputs();
    }

    /// Drops every cached box. Call this after row heights or column widths change.
    pub fn invalidate_styles(&mut self) {
        gdebug!(
            entries = self.caches.styles.len(),
            "GridRangeRenderer::invalidate_styles"
        );
        self.caches.styles.clear();
    }

    /// Drops all caches and re-arms the missing-style diagnostic.
    pub fn reset(&mut self) {
        self.caches.styles.clear();
        self.clear_outputs();
        self.caches.warning.reset();
        self.last_phase = ScrollPhase::Idle;
        self.last_direction = None;
    }

    pub fn style_cache(&self) -> &StyleCache {
        &self.caches.styles
    }

    pub fn cell_cache(&self) -> &OutputCache<C> {
        &self.caches.cells
    }

    pub fn row_cache(&self) -> &OutputCache<R> {
        &self.caches.rows
    }

    /// Whether a rendered cell without a style was reported (debug builds only).
    pub fn warned_about_missing_style(&self) -> bool {
        self.caches.warning.warned()
    }

    fn clear_outputs(&mut self) {
        if self.caches.cells.is_empty() && self.caches.rows.is_empty() {
            return;
        }
        gdebug!(
            cells = self.caches.cells.len(),
            rows = self.caches.rows.len(),
            "GridRangeRenderer: clearing output caches"
        );
        self.caches.cells.clear();
        self.caches.rows.clear();
    }

    fn begin_pass(&mut self, frame: &Frame<'_>) {
        if self.last_phase.caches_output() && !frame.phase.caches_output() {
            self.clear_outputs();
        }
        if self.last_direction.is_some_and(|d| d != frame.direction) {
            self.invalidate_styles();
            self.clear_outputs();
        }
        if !frame.window.rows.covers(&frame.visible.rows)
            || !frame.window.columns.covers(&frame.visible.columns)
        {
            gwarn!(
                window = ?frame.window,
                visible = ?frame.visible,
                "visible range is not contained in the rendered window"
            );
        }
        self.last_phase = frame.phase;
        self.last_direction = Some(frame.direction);
    }
}

impl<C, R> core::fmt::Debug for GridRangeRenderer<C, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridRangeRenderer")
            .field("options", &self.options)
            .field("styles", &self.caches.styles.len())
            .field("cells", &self.caches.cells.len())
            .field("rows", &self.caches.rows.len())
            .field("last_phase", &self.last_phase)
            .finish_non_exhaustive()
    }
}
