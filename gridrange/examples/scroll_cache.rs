// Example: rendered cells are reused while a scroll gesture is in flight.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gridrange::{
    AxisSizes, CellBox, CellParams, Frame, GridRangeRenderer, IndexRange, RendererOptions,
    ScrollPhase, Window,
};

fn main() {
    let rows = AxisSizes::uniform(10_000, 20);
    let columns = AxisSizes::uniform(20, 100);

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut renderer = GridRangeRenderer::new(RendererOptions::new(move |p: &CellParams| {
        counter.fetch_add(1, Ordering::Relaxed);
        Some::<CellBox>(p.style)
    }));

    let mut first_row = 0usize;
    for step in 0..10 {
        let window = Window::new(
            IndexRange::new(first_row, first_row + 19),
            IndexRange::new(0, 7),
        );
        let frame = Frame::new(window, &rows, &columns).with_phase(ScrollPhase::Active);
        renderer.render(&frame);
        println!(
            "step={step} rows={:?} renderer_calls={} cached_cells={}",
            window.rows,
            calls.load(Ordering::Relaxed),
            renderer.cell_cache().len()
        );
        first_row += 3;
    }

    // The gesture ended: the next pass renders fresh output and drops the cache.
    let window = Window::new(
        IndexRange::new(first_row, first_row + 19),
        IndexRange::new(0, 7),
    );
    renderer.render(&Frame::new(window, &rows, &columns));
    println!(
        "idle renderer_calls={} cached_cells={}",
        calls.load(Ordering::Relaxed),
        renderer.cell_cache().len()
    );
}
