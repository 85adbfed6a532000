use gridrange::{CellParams, RendererOptions};
use gridrange_adapter::{CellSize, ControllerOptions, GridController};

fn main() {
    // Example: a controller driven by scroll events and a frame timer, without holding any UI
    // objects.
    //
    // An adapter would:
    // - forward viewport resizes and scroll events
    // - call tick(now_ms) in a frame loop / timer
    // - render and draw the returned rows
    // - report measured cell sizes back
    let mut c = GridController::new(
        ControllerOptions::uniform(100_000, 40, 24, 120)
            .with_overscan(3, 1)
            .with_deferred_measurement(true),
        RendererOptions::new(|p: &CellParams| Some(p.style)),
    );
    c.on_viewport_size(800, 480);

    let mut now_ms = 0u64;
    for step in 0..20u64 {
        now_ms += 16;
        c.on_scroll(0, step * 240, now_ms);
        let columns = c.window().columns;
        let rows = c.render();
        for row in &rows {
            for (i, cell) in row.children.iter().enumerate() {
                if cell.is_placeholder() {
                    let column = columns.start + i;
                    let height = 24 + (column % 3) as u32;
                    c.measure_cell(row.row_index, column, CellSize::new(120, height));
                }
            }
        }
        if step % 5 == 0 {
            println!(
                "t={now_ms} visible={:?} rows={} cached_cells={}",
                c.visible_window(),
                rows.len(),
                c.renderer().cell_cache().len()
            );
        }
    }

    while !c.tick(now_ms) {
        now_ms += 16;
    }
    println!(
        "scroll ended at t={now_ms}: phase={:?} measured={} total_size={:?}",
        c.phase(),
        c.measurements().len(),
        c.total_size()
    );
}
