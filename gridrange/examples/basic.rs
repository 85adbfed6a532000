// Example: render a window of a 1000x50 grid and print the cell boxes.
use gridrange::{
    AxisSizes, CellBox, CellParams, Frame, GridRangeRenderer, IndexRange, RendererOptions, Window,
};

fn main() {
    let rows = AxisSizes::uniform(1_000, 30);
    let columns = AxisSizes::new(50, |i| if i == 0 { 120 } else { 80 });

    let mut renderer = GridRangeRenderer::new(RendererOptions::new(|p: &CellParams| {
        Some(p.style)
    }));

    let visible = Window::new(
        rows.visible_range(4_500, 300).unwrap_or(IndexRange::EMPTY),
        columns.visible_range(0, 400).unwrap_or(IndexRange::EMPTY),
    );
    let window = Window::new(
        visible.rows.overscan(2, rows.len()),
        visible.columns.overscan(1, columns.len()),
    );
    println!("visible={visible:?}");
    println!("window={window:?}");

    let frame = Frame::new(window, &rows, &columns).with_visible(visible);
    let out = renderer.render(&frame);
    for row in out.iter().take(2) {
        println!("{} top={:?}", row.key, row.style.top);
        for cell in &row.children {
            let CellBox { left, width, .. } = **cell;
            println!("  left={left:?} width={width:?}");
        }
    }
    println!("rows={} cached_styles={}", out.len(), renderer.style_cache().len());
}
