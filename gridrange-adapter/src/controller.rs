use alloc::sync::Arc;
use alloc::vec::Vec;

use gridrange::{
    AxisSizes, Direction, Frame, GridRangeRenderer, IndexRange, Positioned, RendererOptions,
    RowContainer, ScrollPhase, Window,
};

use crate::{CellMeasurements, CellSize, DEFAULT_SCROLL_RESET_DELAY_MS, ScrollTracker};

/// Estimates the size of a row or column before it is measured.
pub type EstimateSize = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// Configuration for [`GridController`].
pub struct ControllerOptions {
    pub row_count: usize,
    pub column_count: usize,
    pub estimate_row_height: EstimateSize,
    pub estimate_column_width: EstimateSize,
    /// Extra rows rendered before and after the visible ones.
    pub overscan_rows: usize,
    /// Extra columns rendered before and after the visible ones.
    pub overscan_columns: usize,
    pub direction: Direction,
    pub scroll_reset_delay_ms: u64,
    /// Caches rendered output even while idle.
    pub always_cache: bool,
    /// Render unmeasured cells with placeholder boxes until [`GridController::measure_cell`]
    /// reports their size.
    pub deferred_measurement: bool,
}

impl Clone for ControllerOptions {
    fn clone(&self) -> Self {
        Self {
            row_count: self.row_count,
            column_count: self.column_count,
            estimate_row_height: Arc::clone(&self.estimate_row_height),
            estimate_column_width: Arc::clone(&self.estimate_column_width),
            overscan_rows: self.overscan_rows,
            overscan_columns: self.overscan_columns,
            direction: self.direction,
            scroll_reset_delay_ms: self.scroll_reset_delay_ms,
            always_cache: self.always_cache,
            deferred_measurement: self.deferred_measurement,
        }
    }
}

impl ControllerOptions {
    pub fn new(
        row_count: usize,
        column_count: usize,
        estimate_row_height: impl Fn(usize) -> u32 + Send + Sync + 'static,
        estimate_column_width: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            row_count,
            column_count,
            estimate_row_height: Arc::new(estimate_row_height),
            estimate_column_width: Arc::new(estimate_column_width),
            overscan_rows: 1,
            overscan_columns: 1,
            direction: Direction::Ltr,
            scroll_reset_delay_ms: DEFAULT_SCROLL_RESET_DELAY_MS,
            always_cache: false,
            deferred_measurement: false,
        }
    }

    /// Options for a grid where every row and every column has the same size.
    pub fn uniform(
        row_count: usize,
        column_count: usize,
        row_height: u32,
        column_width: u32,
    ) -> Self {
        Self::new(
            row_count,
            column_count,
            move |_| row_height,
            move |_| column_width,
        )
    }

    pub fn with_overscan(mut self, overscan_rows: usize, overscan_columns: usize) -> Self {
        self.overscan_rows = overscan_rows;
        self.overscan_columns = overscan_columns;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_scroll_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scroll_reset_delay_ms = delay_ms;
        self
    }

    pub fn with_always_cache(mut self, always_cache: bool) -> Self {
        self.always_cache = always_cache;
        self
    }

    pub fn with_deferred_measurement(mut self, deferred_measurement: bool) -> Self {
        self.deferred_measurement = deferred_measurement;
        self
    }

    fn row_axis(&self) -> AxisSizes {
        AxisSizes::new(self.row_count, |i| (self.estimate_row_height)(i))
    }

    fn column_axis(&self) -> AxisSizes {
        AxisSizes::new(self.column_count, |i| (self.estimate_column_width)(i))
    }

    fn scroll_tracker(&self) -> ScrollTracker {
        ScrollTracker::new(self.scroll_reset_delay_ms).with_always_cache(self.always_cache)
    }
}

impl core::fmt::Debug for ControllerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControllerOptions")
            .field("row_count", &self.row_count)
            .field("column_count", &self.column_count)
            .field("overscan_rows", &self.overscan_rows)
            .field("overscan_columns", &self.overscan_columns)
            .field("direction", &self.direction)
            .field("scroll_reset_delay_ms", &self.scroll_reset_delay_ms)
            .field("always_cache", &self.always_cache)
            .field("deferred_measurement", &self.deferred_measurement)
            .finish_non_exhaustive()
    }
}

/// A framework-neutral controller that drives a [`GridRangeRenderer`] from UI events.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame/timer tick (to debounce the end of a scroll gesture)
/// - `render` whenever the grid needs to be drawn
/// - `measure_cell` once a rendered cell's content size is known
pub struct GridController<C, R = RowContainer<C>> {
    options: ControllerOptions,
    rows: AxisSizes,
    columns: AxisSizes,
    scroll: ScrollTracker,
    measurements: CellMeasurements,
    renderer: GridRangeRenderer<C, R>,
    viewport_width: u32,
    viewport_height: u32,
    scroll_left: u64,
    scroll_top: u64,
}

impl<C: Positioned, R> GridController<C, R> {
    pub fn new(options: ControllerOptions, renderer_options: RendererOptions<C, R>) -> Self {
        gdebug!(options = ?options, "GridController::new");
        Self {
            rows: options.row_axis(),
            columns: options.column_axis(),
            scroll: options.scroll_tracker(),
            measurements: CellMeasurements::new(),
            renderer: GridRangeRenderer::new(renderer_options),
            viewport_width: 0,
            viewport_height: 0,
            scroll_left: 0,
            scroll_top: 0,
            options,
        }
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Replaces the options.
    ///
    /// Sizes are rebuilt from the estimates when the counts or estimates change, which also
    /// drops every measurement and cache.
    pub fn set_options(&mut self, options: ControllerOptions) {
        let sizes_changed = self.options.row_count != options.row_count
            || self.options.column_count != options.column_count
            || !Arc::ptr_eq(&self.options.estimate_row_height, &options.estimate_row_height)
            || !Arc::ptr_eq(
                &self.options.estimate_column_width,
                &options.estimate_column_width,
            );
        let deferred_changed = self.options.deferred_measurement != options.deferred_measurement;

        self.scroll.set_reset_delay_ms(options.scroll_reset_delay_ms);
        self.scroll.set_always_cache(options.always_cache);
        self.options = options;
        gtrace!(sizes_changed, deferred_changed, "GridController::set_options");

        if sizes_changed {
            self.rows = self.options.row_axis();
            self.columns = self.options.column_axis();
            self.measurements.clear();
            self.renderer.reset();
        } else if deferred_changed {
            self.renderer.invalidate_styles();
            self.renderer.invalidate_outputs();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ControllerOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn rows(&self) -> &AxisSizes {
        &self.rows
    }

    pub fn columns(&self) -> &AxisSizes {
        &self.columns
    }

    pub fn renderer(&self) -> &GridRangeRenderer<C, R> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut GridRangeRenderer<C, R> {
        &mut self.renderer
    }

    pub fn measurements(&self) -> &CellMeasurements {
        &self.measurements
    }

    pub fn scroll_tracker(&self) -> &ScrollTracker {
        &self.scroll
    }

    pub fn phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn scroll_offset(&self) -> (u64, u64) {
        (self.scroll_left, self.scroll_top)
    }

    pub fn total_size(&self) -> (u64, u64) {
        (self.columns.total_size(), self.rows.total_size())
    }

    pub fn on_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    pub fn on_scroll(&mut self, scroll_left: u64, scroll_top: u64, now_ms: u64) {
        self.scroll_left = scroll_left;
        self.scroll_top = scroll_top;
        self.scroll.on_scroll_event(now_ms);
    }

    /// Advances scroll debouncing.
    ///
    /// Returns `true` when this call ended a scroll gesture; the cached output of that gesture
    /// is dropped.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.scroll.tick(now_ms) {
            return false;
        }
        self.renderer.end_scroll();
        true
    }

    /// The strictly visible rows and columns.
    pub fn visible_window(&self) -> Window {
        let rows = self
            .rows
            .visible_range(self.scroll_top, self.viewport_height)
            .unwrap_or(IndexRange::EMPTY);
        let columns = self
            .columns
            .visible_range(self.scroll_left, self.viewport_width)
            .unwrap_or(IndexRange::EMPTY);
        Window::new(rows, columns)
    }

    /// The visible window widened by the overscan on both axes.
    pub fn window(&self) -> Window {
        let visible = self.visible_window();
        Window::new(
            visible
                .rows
                .overscan(self.options.overscan_rows, self.rows.len()),
            visible
                .columns
                .overscan(self.options.overscan_columns, self.columns.len()),
        )
    }

    /// The frame of the next render pass.
    pub fn frame(&self) -> Frame<'_> {
        pass_frame(
            &self.options,
            &self.scroll,
            &self.rows,
            &self.columns,
            &self.measurements,
            self.window(),
            self.visible_window(),
        )
    }

    /// Renders the current window.
    pub fn render(&mut self) -> Vec<Arc<R>> {
        let frame = pass_frame(
            &self.options,
            &self.scroll,
            &self.rows,
            &self.columns,
            &self.measurements,
            self.window(),
            self.visible_window(),
        );
        self.renderer.render(&frame)
    }

    /// Renders the cells of one row of the current window.
    pub fn render_row_cells(&mut self, row_index: usize) -> Vec<Arc<C>> {
        let frame = pass_frame(
            &self.options,
            &self.scroll,
            &self.rows,
            &self.columns,
            &self.measurements,
            self.window(),
            self.visible_window(),
        );
        self.renderer.render_row_cells(&frame, row_index)
    }

    /// Records the content size of a rendered cell.
    ///
    /// The row grows to its tallest measured cell and the column to its widest. Returns `true`
    /// if the layout changed, in which case cached boxes and outputs are dropped.
    pub fn measure_cell(&mut self, row: usize, column: usize, size: CellSize) -> bool {
        if row >= self.rows.len() || column >= self.columns.len() {
            return false;
        }
        let previous = self.measurements.record(row, column, size);
        let newly_measured = previous.is_none() && self.options.deferred_measurement;

        let height = self.measurements.max_height_in_row(row).unwrap_or(size.height);
        let width = self
            .measurements
            .max_width_in_column(column)
            .unwrap_or(size.width);
        let row_delta = self.rows.set_size(row, height);
        let column_delta = self.columns.set_size(column, width);
        gtrace!(
            row,
            column,
            width = size.width,
            height = size.height,
            row_delta,
            column_delta,
            "GridController::measure_cell"
        );

        let changed = row_delta != 0 || column_delta != 0 || newly_measured;
        if changed {
            self.renderer.invalidate_styles();
            self.renderer.invalidate_outputs();
        }
        changed
    }

    /// Forgets the measurement of one cell so it gets measured again.
    ///
    /// Sizes already grown from it are kept until new measurements replace them.
    pub fn clear_cell_measurement(&mut self, row: usize, column: usize) {
        if self.measurements.clear_cell(row, column).is_some() && self.options.deferred_measurement
        {
            // The cached box is the measured one; the cell must fall back to a placeholder.
            self.renderer.invalidate_styles();
            self.renderer.invalidate_outputs();
        }
    }

    /// Forgets every measurement and restores the estimated sizes.
    pub fn clear_measurements(&mut self) {
        self.measurements.clear();
        self.rows = self.options.row_axis();
        self.columns = self.options.column_axis();
        self.renderer.invalidate_styles();
        self.renderer.invalidate_outputs();
    }
}

fn pass_frame<'a>(
    options: &ControllerOptions,
    scroll: &ScrollTracker,
    rows: &'a AxisSizes,
    columns: &'a AxisSizes,
    measurements: &'a CellMeasurements,
    window: Window,
    visible: Window,
) -> Frame<'a> {
    let frame = Frame::new(window, rows, columns)
        .with_visible(visible)
        .with_phase(scroll.phase())
        .with_direction(options.direction);
    if options.deferred_measurement {
        frame.with_measurements(measurements)
    } else {
        frame
    }
}

impl<C, R> core::fmt::Debug for GridController<C, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridController")
            .field("options", &self.options)
            .field("scroll", &self.scroll)
            .field("measurements", &self.measurements.len())
            .field("renderer", &self.renderer)
            .field("viewport", &(self.viewport_width, self.viewport_height))
            .field("scroll_offset", &(self.scroll_left, self.scroll_top))
            .finish_non_exhaustive()
    }
}
