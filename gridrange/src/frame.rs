use crate::{
    Direction, MeasurementRegistry, OffsetAdjustment, ScrollPhase, SizeAndPositionOracle, Window,
};

/// Everything a single render pass reads.
///
/// A frame is rebuilt by the host for every pass; nothing in it outlives the pass. State that
/// does survive between passes (the caches) lives in [`crate::GridRangeRenderer`].
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    /// The materialized window, including overscan.
    pub window: Window,
    /// The strictly visible part of `window`.
    pub visible: Window,
    pub phase: ScrollPhase,
    pub adjustment: OffsetAdjustment,
    pub direction: Direction,
    pub rows: &'a dyn SizeAndPositionOracle,
    pub columns: &'a dyn SizeAndPositionOracle,
    /// Deferred-measurement registry. `None` means every cell counts as measured.
    pub measurements: Option<&'a dyn MeasurementRegistry>,
}

impl<'a> Frame<'a> {
    /// Creates an idle, left-to-right frame where the whole window is visible.
    pub fn new(
        window: Window,
        rows: &'a dyn SizeAndPositionOracle,
        columns: &'a dyn SizeAndPositionOracle,
    ) -> Self {
        Self {
            window,
            visible: window,
            phase: ScrollPhase::Idle,
            adjustment: OffsetAdjustment::ZERO,
            direction: Direction::Ltr,
            rows,
            columns,
            measurements: None,
        }
    }

    pub fn with_visible(mut self, visible: Window) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_phase(mut self, phase: ScrollPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_adjustment(mut self, adjustment: OffsetAdjustment) -> Self {
        self.adjustment = adjustment;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_measurements(mut self, measurements: &'a dyn MeasurementRegistry) -> Self {
        self.measurements = Some(measurements);
        self
    }

    pub fn is_scrolling(&self) -> bool {
        self.phase.is_scrolling()
    }

    /// `true` if either axis reports compressed offsets.
    pub fn offsets_adjusted(&self) -> bool {
        self.columns.are_offsets_adjusted() || self.rows.are_offsets_adjusted()
    }

    /// Boxes may be read from and written to the style cache.
    ///
    /// Not while scrolling (the boxes would churn), and never from compressed or adjusted
    /// offsets (the compression ratio changes between frames).
    pub fn can_cache_style(&self) -> bool {
        !self.is_scrolling() && !self.offsets_adjusted() && self.adjustment.is_zero()
    }

    /// Rendered outputs may be read from and written to the output caches.
    ///
    /// Only during a scroll gesture (or with the always-cache opt-out), and only while no offset
    /// adjustment is in effect, since adjusted offsets shift slightly on every scroll event.
    pub fn can_cache_output(&self) -> bool {
        self.phase.caches_output() && self.adjustment.is_zero()
    }

    pub fn is_row_visible(&self, row: usize) -> bool {
        self.visible.rows.contains(row)
    }

    pub fn is_cell_visible(&self, row: usize, column: usize) -> bool {
        self.visible.contains(row, column)
    }

    pub(crate) fn is_measured(&self, row: usize, column: usize) -> bool {
        self.measurements.is_none_or(|m| m.has(row, column))
    }
}

impl core::fmt::Debug for Frame<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Frame")
            .field("window", &self.window)
            .field("visible", &self.visible)
            .field("phase", &self.phase)
            .field("adjustment", &self.adjustment)
            .field("direction", &self.direction)
            .field("has_measurements", &self.measurements.is_some())
            .finish_non_exhaustive()
    }
}
