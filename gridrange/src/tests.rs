use crate::*;

use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        start + (self.next_u64() % (end_exclusive - start) as u64) as u32
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Cell {
    key: CacheKey,
    style: CellBox,
    visible: bool,
    scrolling: bool,
    stamp: usize,
}

impl Positioned for Cell {
    fn style(&self) -> Option<&CellBox> {
        Some(&self.style)
    }
}

/// A cell output that forgot its style.
#[derive(Debug)]
struct Bare;

impl Positioned for Bare {
    fn style(&self) -> Option<&CellBox> {
        None
    }
}

/// An axis whose offsets pretend to be compressed.
struct Compressed(AxisSizes);

impl SizeAndPositionOracle for Compressed {
    fn size_and_position(&self, index: usize) -> SizeAndPosition {
        self.0.size_and_position(index)
    }

    fn are_offsets_adjusted(&self) -> bool {
        true
    }
}

fn stamped(counter: Arc<AtomicUsize>) -> impl Fn(&CellParams) -> Option<Cell> + Send + Sync {
    move |p| {
        Some(Cell {
            key: p.key,
            style: p.style,
            visible: p.is_visible,
            scrolling: p.is_scrolling,
            stamp: counter.fetch_add(1, Ordering::Relaxed),
        })
    }
}

fn renderer() -> (GridRangeRenderer<Cell>, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    let r = GridRangeRenderer::new(RendererOptions::new(stamped(Arc::clone(&counter))));
    (r, counter)
}

fn window(r0: usize, r1: usize, c0: usize, c1: usize) -> Window {
    Window::new(IndexRange::new(r0, r1), IndexRange::new(c0, c1))
}

fn axes() -> (AxisSizes, AxisSizes) {
    (AxisSizes::uniform(100, 40), AxisSizes::uniform(50, 75))
}

fn cells(rows: &[Arc<RowContainer<Cell>>]) -> Vec<Arc<Cell>> {
    rows.iter()
        .flat_map(|row| row.children.iter().cloned())
        .collect()
}

fn keys(rows: &[Arc<RowContainer<Cell>>]) -> Vec<alloc::string::String> {
    cells(rows).iter().map(|c| c.key.to_string()).collect()
}

fn measured(left: i64, width: u32) -> CellBox {
    CellBox {
        position: Position::Absolute,
        top: Some(0),
        bottom: Some(0),
        left: Some(left),
        right: None,
        width: Some(Extent::Px(width)),
        height: None,
    }
}

#[test]
fn renders_window_with_visibility_and_boxes() {
    let (rows, columns) = axes();
    let (mut r, _) = renderer();
    let frame = Frame::new(window(0, 1, 0, 2), &rows, &columns).with_visible(window(0, 1, 1, 2));

    let out = r.render(&frame);
    assert_eq!(out.len(), 2);
    assert_eq!(
        keys(&out),
        vec!["0-0", "0-1", "0-2", "1-0", "1-1", "1-2"]
    );

    let all = cells(&out);
    assert!(!all[0].visible);
    assert!(all[1].visible);
    assert!(all[2].visible);
    assert!(!all[3].visible);
    assert_eq!(all[2].style, measured(150, 75));
    assert_eq!(all[5].style, measured(150, 75));
    assert!(all.iter().all(|c| !c.scrolling));

    assert_eq!(out[1].key.to_string(), "row-1");
    assert_eq!(out[1].role, "row");
    assert_eq!(
        out[1].style,
        CellBox {
            position: Position::Absolute,
            top: Some(40),
            left: Some(0),
            height: Some(Extent::Px(40)),
            ..CellBox::default()
        }
    );
}

#[test]
fn overscanned_rows_mark_all_their_cells_invisible() {
    let (rows, columns) = axes();
    let (mut r, _) = renderer();
    let frame = Frame::new(window(0, 2, 0, 1), &rows, &columns).with_visible(window(1, 1, 0, 1));

    let out = r.render(&frame);
    let visible: Vec<bool> = cells(&out).iter().map(|c| c.visible).collect();
    assert_eq!(visible, vec![false, false, true, true, false, false]);
}

#[test]
fn output_is_deterministic_with_cleared_caches() {
    let (rows, columns) = axes();
    for phase in [ScrollPhase::Idle, ScrollPhase::Active] {
        let frame = Frame::new(window(3, 6, 2, 5), &rows, &columns)
            .with_visible(window(4, 5, 3, 4))
            .with_phase(phase);

        let (mut a, _) = renderer();
        let (mut b, _) = renderer();
        let first = a.render(&frame);
        a.reset();
        let second = a.render(&frame);
        let third = b.render(&frame);

        let strip = |rows: &[Arc<RowContainer<Cell>>]| -> Vec<(CacheKey, CellBox, bool)> {
            cells(rows)
                .iter()
                .map(|c| (c.key, c.style, c.visible))
                .collect()
        };
        assert_eq!(strip(&first), strip(&second));
        assert_eq!(strip(&first), strip(&third));
    }
}

#[test]
fn outputs_are_ordered_by_row_then_column() {
    let (rows, columns) = axes();
    let (mut r, _) = renderer();
    let frame = Frame::new(window(10, 14, 7, 12), &rows, &columns);

    let out = r.render(&frame);
    let row_indexes: Vec<usize> = out.iter().map(|row| row.row_index).collect();
    assert_eq!(row_indexes, vec![10, 11, 12, 13, 14]);
    for row in &out {
        let cols: Vec<usize> = row
            .children
            .iter()
            .map(|c| match c.key {
                CacheKey::Cell { column, .. } => column,
                CacheKey::Row(_) => unreachable!(),
            })
            .collect();
        assert_eq!(cols, (7..=12).collect::<Vec<_>>());
        assert!(row.children.iter().all(|c| c.key.row_index() == row.row_index));
    }
}

#[test]
fn none_skips_the_cell_and_caches_nothing() {
    let (rows, columns) = axes();
    let mut r = GridRangeRenderer::new(RendererOptions::new(|p: &CellParams| {
        (p.column_index != 1).then_some(Cell {
            key: p.key,
            style: p.style,
            visible: p.is_visible,
            scrolling: p.is_scrolling,
            stamp: 0,
        })
    }));
    let frame = Frame::new(window(0, 1, 0, 2), &rows, &columns).with_phase(ScrollPhase::Active);

    let out = r.render(&frame);
    assert_eq!(keys(&out), vec!["0-0", "0-2", "1-0", "1-2"]);
    assert!(!r.cell_cache().contains(&CacheKey::cell(0, 1)));
    assert!(!r.cell_cache().contains(&CacheKey::cell(1, 1)));
    assert!(r.cell_cache().contains(&CacheKey::cell(0, 0)));
    assert_eq!(r.cell_cache().len(), 4);
}

#[test]
fn active_phase_reuses_cached_output_by_identity() {
    let (rows, columns) = axes();
    let (mut r, counter) = renderer();
    let frame = Frame::new(window(0, 1, 0, 2), &rows, &columns).with_phase(ScrollPhase::Active);

    let first = r.render(&frame);
    let second = r.render(&frame);
    assert_eq!(counter.load(Ordering::Relaxed), 6);

    for (a, b) in first.iter().zip(&second) {
        assert!(Arc::ptr_eq(a, b));
    }
    for (a, b) in cells(&first).iter().zip(&cells(&second)) {
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(a.stamp, b.stamp);
        assert!(a.scrolling);
    }
}

#[test]
fn row_cells_are_reused_while_scrolling() {
    let (rows, columns) = axes();
    let counter = Arc::new(AtomicUsize::new(0));
    let mut r = GridRangeRenderer::new(
        RendererOptions::new(stamped(Arc::clone(&counter)))
            .with_row_renderer(|p: RowParams<Cell>| Some(p.children)),
    );
    let frame = Frame::new(window(0, 0, 0, 3), &rows, &columns).with_phase(ScrollPhase::Active);

    let first = r.render_row_cells(&frame, 0);
    let second = r.render_row_cells(&frame, 0);
    assert_eq!(counter.load(Ordering::Relaxed), 4);
    for (a, b) in first.iter().zip(&second) {
        assert!(Arc::ptr_eq(a, b));
    }
}

#[test]
fn offset_adjustment_bypasses_the_output_cache() {
    let (rows, columns) = axes();
    let (mut r, counter) = renderer();
    let frame = Frame::new(window(0, 1, 0, 2), &rows, &columns)
        .with_phase(ScrollPhase::Active)
        .with_adjustment(OffsetAdjustment::new(0, -3));

    let first = r.render(&frame);
    let second = r.render(&frame);
    assert_eq!(counter.load(Ordering::Relaxed), 12);
    assert!(r.cell_cache().is_empty());
    assert!(r.row_cache().is_empty());
    for (a, b) in cells(&first).iter().zip(&cells(&second)) {
        assert!(!Arc::ptr_eq(a, b));
        assert_ne!(a.stamp, b.stamp);
    }
}

#[test]
fn compressed_offsets_bypass_the_style_cache() {
    let (rows, columns) = axes();
    let columns = Compressed(columns);
    let (mut r, counter) = renderer();

    let idle = Frame::new(window(0, 1, 0, 2), &rows, &columns);
    r.render(&idle);
    assert!(r.style_cache().is_empty());

    // Output caching only looks at the adjustments themselves.
    let active = idle.with_phase(ScrollPhase::Active);
    r.render(&active);
    r.render(&active);
    assert_eq!(counter.load(Ordering::Relaxed), 12);
    assert_eq!(r.cell_cache().len(), 6);
    assert!(r.style_cache().is_empty());
}

#[test]
fn idle_phase_caches_styles_but_not_output() {
    let (rows, columns) = axes();
    let (mut r, counter) = renderer();
    let frame = Frame::new(window(0, 1, 0, 2), &rows, &columns);

    let first = r.render(&frame);
    let second = r.render(&frame);
    assert_eq!(counter.load(Ordering::Relaxed), 12);
    assert!(r.cell_cache().is_empty());
    assert!(r.row_cache().is_empty());
    // 6 cells + 2 rows.
    assert_eq!(r.style_cache().len(), 8);
    assert_eq!(
        r.style_cache().get(&CacheKey::cell(1, 2)),
        Some(measured(150, 75))
    );
    assert_ne!(cells(&first)[0].stamp, cells(&second)[0].stamp);
}

#[test]
fn scrolling_neither_reads_nor_writes_styles() {
    let (rows, mut columns) = axes();
    let (mut r, _) = renderer();

    let idle = Frame::new(window(0, 0, 0, 2), &rows, &columns);
    r.render(&idle);
    assert_eq!(r.style_cache().len(), 4);

    columns.set_size(0, 100);
    let active = Frame::new(window(0, 0, 0, 2), &rows, &columns).with_phase(ScrollPhase::Active);
    let out = r.render(&active);
    // Fresh boxes while scrolling, even though stale ones are cached.
    assert_eq!(cells(&out)[1].style, measured(100, 75));
    assert_eq!(r.style_cache().len(), 4);
    assert_eq!(
        r.style_cache().get(&CacheKey::cell(0, 1)),
        Some(measured(75, 75))
    );
}

#[test]
fn cached_styles_survive_size_changes_until_invalidated() {
    let (rows, mut columns) = axes();
    let (mut r, _) = renderer();

    let out = r.render(&Frame::new(window(0, 0, 0, 2), &rows, &columns));
    assert_eq!(cells(&out)[2].style, measured(150, 75));

    columns.set_size(0, 10);
    let out = r.render(&Frame::new(window(0, 0, 0, 2), &rows, &columns));
    assert_eq!(cells(&out)[2].style, measured(150, 75));

    r.invalidate_styles();
    let out = r.render(&Frame::new(window(0, 0, 0, 2), &rows, &columns));
    assert_eq!(cells(&out)[2].style, measured(85, 75));
}

#[test]
fn rtl_mirrors_offsets_onto_the_right_side() {
    let (rows, columns) = axes();
    let (mut ltr, _) = renderer();
    let (mut rtl, _) = renderer();
    let frame = Frame::new(window(0, 1, 0, 3), &rows, &columns);

    let a = ltr.render(&frame);
    let b = rtl.render(&frame.with_direction(Direction::Rtl));
    for (l, r) in cells(&a).iter().zip(&cells(&b)) {
        assert!(l.style.left.is_some());
        assert!(l.style.right.is_none());
        assert!(r.style.left.is_none());
        assert!(r.style.right.is_some());
        assert_eq!(l.style.left, r.style.right);
        assert_eq!(l.style.width, r.style.width);
    }
    for (l, r) in a.iter().zip(&b) {
        assert_eq!(l.style.left, Some(0));
        assert_eq!(r.style.right, Some(0));
        assert_eq!(r.style.left, None);
        assert_eq!(l.style.top, r.style.top);
    }
}

#[test]
fn direction_change_drops_cached_styles() {
    let (rows, columns) = axes();
    let (mut r, _) = renderer();
    let frame = Frame::new(window(0, 0, 0, 2), &rows, &columns);

    r.render(&frame);
    assert!(!r.style_cache().is_empty());

    let out = r.render(&frame.with_direction(Direction::Rtl));
    let all = cells(&out);
    assert_eq!(all[2].style.right, Some(150));
    assert_eq!(all[2].style.left, None);
}

#[test]
fn direction_change_while_scrolling_drops_cached_output() {
    let (rows, columns) = axes();
    let (mut r, counter) = renderer();
    let active = Frame::new(window(0, 0, 0, 2), &rows, &columns).with_phase(ScrollPhase::Active);

    let ltr = r.render(&active);
    assert_eq!(cells(&ltr)[2].style.left, Some(150));

    let rtl = r.render(&active.with_direction(Direction::Rtl));
    let all = cells(&rtl);
    assert_eq!(counter.load(Ordering::Relaxed), 6);
    assert!(!Arc::ptr_eq(&ltr[0], &rtl[0]));
    assert_eq!(all[2].style.right, Some(150));
    assert_eq!(all[2].style.left, None);
    assert!(all.iter().all(|c| c.style.left.is_none()));
    assert_eq!(rtl[0].style.right, Some(0));

    // The new direction starts caching again.
    let again = r.render(&active.with_direction(Direction::Rtl));
    assert!(Arc::ptr_eq(&rtl[0], &again[0]));
    assert_eq!(counter.load(Ordering::Relaxed), 6);
}

#[test]
fn unmeasured_cells_get_auto_sized_placeholders() {
    let (rows, columns) = axes();
    let registry = |_row: usize, column: usize| column != 2;
    let (mut r, _) = renderer();
    let frame = Frame::new(window(3, 3, 0, 3), &rows, &columns).with_measurements(&registry);

    let out = r.render(&frame);
    let all = cells(&out);
    assert_eq!(all[1].style, measured(75, 75));
    assert_eq!(all[2].style, placeholder_box(Direction::Ltr));
    assert_eq!(all[2].style.left, Some(0));
    assert_eq!(all[2].style.top, Some(0));
    assert_eq!(all[2].style.width, Some(Extent::Auto));
    assert_eq!(all[2].style.height, Some(Extent::Auto));
    assert!(all[2].style.is_placeholder());
    // Rows are never placeholders.
    assert_eq!(out[0].style.top, Some(120));

    // Placeholders are never cached, measured boxes are.
    assert!(!r.style_cache().contains(&CacheKey::cell(3, 2)));
    assert!(r.style_cache().contains(&CacheKey::cell(3, 1)));

    let out = r.render(&frame.with_direction(Direction::Rtl));
    let placeholder = cells(&out)[2].style;
    assert_eq!(placeholder.right, Some(0));
    assert_eq!(placeholder.left, None);
}

#[test]
fn zero_sized_cells_still_render() {
    let rows = AxisSizes::uniform(2, 0);
    let columns = AxisSizes::from_sizes(vec![0, 10, 0]);
    let (mut r, _) = renderer();
    let out = r.render(&Frame::new(window(0, 1, 0, 2), &rows, &columns));

    assert_eq!(out.len(), 2);
    assert_eq!(out[1].style.height, Some(Extent::Px(0)));
    let all = cells(&out);
    assert_eq!(all.len(), 6);
    assert_eq!(all[0].style, measured(0, 0));
    assert_eq!(all[2].style, measured(10, 0));
}

#[test]
fn rows_are_cached_as_units_while_scrolling() {
    let (rows, columns) = axes();
    let row_calls = Arc::new(AtomicUsize::new(0));
    let calls = Arc::clone(&row_calls);
    let cell_calls = Arc::new(AtomicUsize::new(0));
    let mut r = GridRangeRenderer::new(RendererOptions::new_with_row_renderer(
        stamped(Arc::clone(&cell_calls)),
        move |p: RowParams<Cell>| {
            calls.fetch_add(1, Ordering::Relaxed);
            Some(RowContainer::from(p))
        },
    ));
    let frame = Frame::new(window(0, 2, 0, 2), &rows, &columns).with_phase(ScrollPhase::Active);

    let first = r.render(&frame);
    let second = r.render(&frame);
    assert_eq!(row_calls.load(Ordering::Relaxed), 3);
    assert_eq!(cell_calls.load(Ordering::Relaxed), 9);
    assert_eq!(r.row_cache().len(), 3);
    for (a, b) in first.iter().zip(&second) {
        assert!(Arc::ptr_eq(a, b));
    }
}

#[test]
fn none_from_the_row_renderer_skips_the_row() {
    let (rows, columns) = axes();
    let counter = Arc::new(AtomicUsize::new(0));
    let mut r = GridRangeRenderer::new(RendererOptions::new_with_row_renderer(
        stamped(counter),
        |p: RowParams<Cell>| (p.row_index != 1).then(|| RowContainer::from(p)),
    ));
    let frame = Frame::new(window(0, 2, 0, 0), &rows, &columns).with_phase(ScrollPhase::Active);

    let out = r.render(&frame);
    let row_indexes: Vec<usize> = out.iter().map(|row| row.row_index).collect();
    assert_eq!(row_indexes, vec![0, 2]);
    assert!(!r.row_cache().contains(&CacheKey::row(1)));
    assert!(r.row_cache().contains(&CacheKey::row(2)));
}

#[test]
fn flowed_layout_stacks_relative_rows() {
    let (rows, columns) = axes();
    let counter = Arc::new(AtomicUsize::new(0));
    let mut r = GridRangeRenderer::new(
        RendererOptions::new(stamped(Arc::clone(&counter))).with_layout(RowLayout::Flowed),
    );
    let frame = Frame::new(window(4, 5, 1, 2), &rows, &columns)
        .with_adjustment(OffsetAdjustment::new(-5, 7));

    let out = r.render(&frame);
    assert_eq!(
        out[0].style,
        CellBox {
            position: Position::Relative,
            height: Some(Extent::Px(40)),
            ..CellBox::default()
        }
    );
    assert_eq!(out[1].style, out[0].style);
    let all = cells(&out);
    assert_eq!(all[0].style, measured(70, 75));
    assert_eq!(all[1].style, measured(145, 75));
}

#[test]
fn flowed_layout_invokes_the_row_renderer_once_per_cached_row() {
    let (rows, columns) = axes();
    let row_calls = Arc::new(AtomicUsize::new(0));
    let calls = Arc::clone(&row_calls);
    let mut r = GridRangeRenderer::new(
        RendererOptions::new_with_row_renderer(
            stamped(Arc::new(AtomicUsize::new(0))),
            move |p: RowParams<Cell>| {
                calls.fetch_add(1, Ordering::Relaxed);
                Some(RowContainer::from(p))
            },
        )
        .with_layout(RowLayout::Flowed),
    );
    let frame = Frame::new(window(0, 3, 0, 1), &rows, &columns).with_phase(ScrollPhase::Active);

    r.render(&frame);
    r.render(&frame);
    assert_eq!(row_calls.load(Ordering::Relaxed), 4);
}

#[test]
fn adjustments_shift_row_tops_and_cell_offsets() {
    let (rows, columns) = axes();
    let (mut r, _) = renderer();
    let frame = Frame::new(window(1, 1, 2, 2), &rows, &columns)
        .with_adjustment(OffsetAdjustment::new(-10, 5));

    let out = r.render(&frame);
    assert_eq!(out[0].style.top, Some(45));
    assert_eq!(cells(&out)[0].style, measured(140, 75));
    assert!(r.style_cache().is_empty());
}

#[test]
fn scroll_end_drops_cached_output() {
    let (rows, columns) = axes();
    let (mut r, counter) = renderer();
    let active = Frame::new(window(0, 1, 0, 1), &rows, &columns).with_phase(ScrollPhase::Active);

    let during = r.render(&active);
    assert_eq!(r.cell_cache().len(), 4);
    assert_eq!(r.row_cache().len(), 2);

    let after = r.render(&active.with_phase(ScrollPhase::Idle));
    assert!(r.cell_cache().is_empty());
    assert!(r.row_cache().is_empty());
    assert_eq!(counter.load(Ordering::Relaxed), 8);
    assert!(!Arc::ptr_eq(&during[0], &after[0]));
    assert!(cells(&after).iter().all(|c| !c.scrolling));

    // A new gesture starts a new epoch.
    let next = r.render(&active);
    assert_eq!(counter.load(Ordering::Relaxed), 12);
    assert_eq!(r.cell_cache().len(), 4);
    assert!(!Arc::ptr_eq(&during[0], &next[0]));
}

#[test]
fn end_scroll_clears_outputs_explicitly() {
    let (rows, columns) = axes();
    let (mut r, counter) = renderer();
    let active = Frame::new(window(0, 0, 0, 1), &rows, &columns).with_phase(ScrollPhase::Active);

    r.render(&active);
    r.end_scroll();
    assert!(r.cell_cache().is_empty());
    r.render(&active);
    assert_eq!(counter.load(Ordering::Relaxed), 4);
}

#[test]
fn opt_out_always_caches_output_and_styles() {
    let (rows, columns) = axes();
    let (mut r, counter) = renderer();
    let frame = Frame::new(window(0, 1, 0, 1), &rows, &columns)
        .with_phase(ScrollPhase::OptOutAlwaysCache);

    let first = r.render(&frame);
    let second = r.render(&frame);
    assert_eq!(counter.load(Ordering::Relaxed), 4);
    assert!(Arc::ptr_eq(&first[0], &second[0]));
    assert!(cells(&first).iter().all(|c| !c.scrolling));
    assert_eq!(r.style_cache().len(), 6);

    // Switching to an active gesture keeps the same epoch.
    let third = r.render(&frame.with_phase(ScrollPhase::Active));
    assert!(Arc::ptr_eq(&first[1], &third[1]));
}

#[test]
fn missing_style_warns_once_per_renderer() {
    let (rows, columns) = axes();
    let mut r = GridRangeRenderer::new(RendererOptions::new(|_: &CellParams| Some(Bare)));
    assert!(!r.warned_about_missing_style());

    let out = r.render(&Frame::new(window(0, 1, 0, 1), &rows, &columns));
    // Rendering carries on with whatever the renderer returned.
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].children.len(), 2);
    assert_eq!(r.warned_about_missing_style(), cfg!(debug_assertions));

    r.reset();
    assert!(!r.warned_about_missing_style());

    let (mut fine, _) = renderer();
    fine.render(&Frame::new(window(0, 1, 0, 1), &rows, &columns));
    assert!(!fine.warned_about_missing_style());
}

#[test]
fn cell_range_override_can_render_a_subset() {
    let (rows, columns) = axes();
    let counter = Arc::new(AtomicUsize::new(0));
    let mut options = RendererOptions::new(stamped(Arc::clone(&counter)));
    options.cell_range_renderer = Some(Arc::new(|scope: CellRangeScope<'_, Cell>| {
        let visible = scope.frame().visible.columns;
        scope.render_columns(visible)
    }));
    let mut r = GridRangeRenderer::new(options);
    let frame = Frame::new(window(0, 1, 0, 4), &rows, &columns).with_visible(window(0, 1, 2, 3));

    let out = r.render(&frame);
    assert_eq!(keys(&out), vec!["0-2", "0-3", "1-2", "1-3"]);
    assert_eq!(counter.load(Ordering::Relaxed), 4);
    assert!(cells(&out).iter().all(|c| c.visible));
}

#[test]
fn cell_range_override_can_post_process_default_output() {
    let (rows, columns) = axes();
    let r_opts = RendererOptions::new(stamped(Arc::new(AtomicUsize::new(0))))
        .with_cell_range_renderer(Some(|scope: CellRangeScope<'_, Cell>| {
            let keep_row = scope.row_index() % 2 == 0;
            let out = scope.render();
            if keep_row { out } else { Vec::new() }
        }));
    let mut r = GridRangeRenderer::new(r_opts);

    let out = r.render(&Frame::new(window(0, 3, 0, 1), &rows, &columns));
    let sizes: Vec<usize> = out.iter().map(|row| row.children.len()).collect();
    assert_eq!(sizes, vec![2, 0, 2, 0]);
}

#[test]
fn render_row_cells_renders_one_row() {
    let (rows, columns) = axes();
    let (mut r, _) = renderer();
    let frame = Frame::new(window(0, 9, 0, 2), &rows, &columns).with_visible(window(2, 4, 0, 1));

    let out = r.render_row_cells(&frame, 3);
    let k: Vec<_> = out.iter().map(|c| c.key.to_string()).collect();
    assert_eq!(k, vec!["3-0", "3-1", "3-2"]);
    let visible: Vec<bool> = out.iter().map(|c| c.visible).collect();
    assert_eq!(visible, vec![true, true, false]);

    let hidden = r.render_row_cells(&frame, 8);
    assert!(hidden.iter().all(|c| !c.visible));
}

#[test]
fn empty_windows_render_nothing() {
    let (rows, columns) = axes();
    let (mut r, counter) = renderer();

    let out = r.render(&Frame::new(Window::EMPTY, &rows, &columns));
    assert!(out.is_empty());

    let out = r.render(&Frame::new(
        Window::new(IndexRange::new(0, 2), IndexRange::EMPTY),
        &rows,
        &columns,
    ));
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|row| row.children.is_empty()));
    assert_eq!(counter.load(Ordering::Relaxed), 0);
}

#[test]
fn set_options_invalidates_what_changed() {
    let (rows, columns) = axes();
    let (mut r, _) = renderer();
    let active = Frame::new(window(0, 0, 0, 1), &rows, &columns)
        .with_phase(ScrollPhase::OptOutAlwaysCache);

    r.render(&active);
    assert!(!r.style_cache().is_empty());
    assert!(!r.cell_cache().is_empty());

    // Same renderers, same layout: nothing is dropped.
    let same = r.options().clone();
    r.set_options(same);
    assert!(!r.style_cache().is_empty());
    assert!(!r.cell_cache().is_empty());

    // Outputs rendered for the old layout carry the old row boxes.
    r.update_options(|o| o.layout = RowLayout::Flowed);
    assert!(r.style_cache().is_empty());
    assert!(r.cell_cache().is_empty());
    assert!(r.row_cache().is_empty());

    let out = r.render(&active);
    assert_eq!(out[0].style.position, Position::Relative);
    assert!(!r.cell_cache().is_empty());

    r.update_options(|o| {
        o.cell_renderer = Arc::new(|_: &CellParams| -> Option<Cell> { None });
    });
    assert!(r.cell_cache().is_empty());
    assert!(r.row_cache().is_empty());
}

#[test]
fn direction_parsing_defaults_to_ltr() {
    assert_eq!(Direction::parse("rtl"), Direction::Rtl);
    assert_eq!(Direction::parse(" RTL "), Direction::Rtl);
    assert_eq!(Direction::from("ltr"), Direction::Ltr);
    assert_eq!(Direction::parse("auto"), Direction::Ltr);
    assert_eq!(Direction::parse(""), Direction::Ltr);
    assert_eq!(Direction::default(), Direction::Ltr);
}

#[test]
fn cache_keys_format_like_element_keys() {
    assert_eq!(CacheKey::cell(3, 7).to_string(), "3-7");
    assert_eq!(CacheKey::row(3).to_string(), "row-3");
    assert_ne!(CacheKey::cell(3, 3), CacheKey::row(3));
    assert_eq!(CacheKey::cell(4, 1).row_index(), 4);
}

#[test]
fn index_ranges_overscan_and_cover() {
    let r = IndexRange::new(5, 8);
    assert_eq!(r.len(), 4);
    assert_eq!(r.overscan(2, 100), IndexRange::new(3, 10));
    assert_eq!(r.overscan(10, 9), IndexRange::new(0, 8));
    assert_eq!(r.overscan(1, 0), IndexRange::EMPTY);
    assert!(IndexRange::EMPTY.is_empty());
    assert_eq!(IndexRange::EMPTY.len(), 0);
    assert_eq!(IndexRange::EMPTY.iter().count(), 0);
    assert!(r.covers(&IndexRange::new(6, 7)));
    assert!(r.covers(&IndexRange::EMPTY));
    assert!(!r.covers(&IndexRange::new(4, 7)));
    assert!(IndexRange::single(3).contains(3));

    let full = IndexRange::new(0, usize::MAX);
    assert_eq!(full.len(), usize::MAX);
    assert!(!full.is_empty());
}

#[test]
fn axis_sizes_map_offsets_and_visible_ranges() {
    let mut axis = AxisSizes::from_sizes(vec![10, 20, 30, 40]);
    assert_eq!(axis.total_size(), 100);
    assert_eq!(axis.size_and_position(2), SizeAndPosition::new(30, 30));
    assert_eq!(axis.size_and_position(9), SizeAndPosition::new(100, 0));
    assert_eq!(axis.index_at_offset(0), Some(0));
    assert_eq!(axis.index_at_offset(29), Some(1));
    assert_eq!(axis.index_at_offset(30), Some(2));
    assert_eq!(axis.index_at_offset(1_000), Some(3));

    assert_eq!(axis.visible_range(15, 20), Some(IndexRange::new(1, 2)));
    assert_eq!(axis.visible_range(0, 10), Some(IndexRange::new(0, 0)));
    // Clamped so the viewport ends at the last item.
    assert_eq!(axis.visible_range(500, 50), Some(IndexRange::new(2, 3)));
    assert_eq!(axis.visible_range(0, 0), None);
    assert_eq!(AxisSizes::default().visible_range(0, 10), None);

    assert_eq!(axis.set_size(1, 5), -15);
    assert_eq!(axis.set_size(1, 5), 0);
    assert_eq!(axis.set_size(99, 5), 0);
    assert_eq!(axis.total_size(), 85);
    assert_eq!(axis.size_and_position(3), SizeAndPosition::new(45, 40));
    assert!(!axis.are_offsets_adjusted());
}

#[test]
fn axis_sizes_match_naive_prefix_sums() {
    let mut rng = Lcg::new(0x5eed);
    let sizes: Vec<u32> = (0..257).map(|_| rng.gen_range_u32(0, 50)).collect();
    let mut axis = AxisSizes::new(sizes.len(), |i| sizes[i]);
    let mut expected = sizes.clone();

    for _ in 0..64 {
        let index = rng.gen_range_u32(0, expected.len() as u32) as usize;
        let size = rng.gen_range_u32(0, 80);
        axis.set_size(index, size);
        expected[index] = size;
    }

    let mut offset = 0u64;
    for (i, &size) in expected.iter().enumerate() {
        assert_eq!(axis.size_and_position(i), SizeAndPosition::new(offset, size));
        if size > 0 {
            assert_eq!(axis.index_at_offset(offset), Some(i));
        }
        offset += size as u64;
    }
    assert_eq!(axis.total_size(), offset);
}
