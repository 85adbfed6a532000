// Example: right-to-left table output with flowed rows and deferred measurement.
use gridrange::{
    AxisSizes, CellParams, Direction, Frame, GridRangeRenderer, IndexRange, RendererOptions,
    RowContainer, RowLayout, RowParams, Window,
};

#[derive(Debug)]
struct Text {
    value: String,
    style: gridrange::CellBox,
}

impl gridrange::Positioned for Text {
    fn style(&self) -> Option<&gridrange::CellBox> {
        Some(&self.style)
    }
}

fn main() {
    let rows = AxisSizes::uniform(100, 24);
    let columns = AxisSizes::from_sizes(vec![60, 140, 90]);
    // The last column has not been measured yet.
    let measured = |_row: usize, column: usize| column < 2;

    let options = RendererOptions::new_with_row_renderer(
        |p: &CellParams| {
            Some(Text {
                value: format!("r{}c{}", p.row_index, p.column_index),
                style: p.style,
            })
        },
        |p: RowParams<Text>| Some(RowContainer::from(p)),
    )
    .with_layout(RowLayout::Flowed);
    let mut renderer = GridRangeRenderer::new(options);

    let window = Window::new(IndexRange::new(0, 2), IndexRange::new(0, 2));
    let frame = Frame::new(window, &rows, &columns)
        .with_direction(Direction::parse("rtl"))
        .with_measurements(&measured);

    for row in renderer.render(&frame) {
        println!("<tr key={} style={:?}>", row.key, row.style);
        for cell in &row.children {
            println!(
                "  <td right={:?} width={:?}>{}</td>",
                cell.style.right, cell.style.width, cell.value
            );
        }
    }
}
