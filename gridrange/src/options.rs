use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{CellParams, CellRangeScope, RowContainer, RowParams};

/// Renders one cell. Returning `None` renders nothing for that cell.
pub type CellRenderer<C> = Arc<dyn Fn(&CellParams) -> Option<C> + Send + Sync>;

/// Renders one row around its already rendered cells. Returning `None` skips the row.
pub type RowRenderer<C, R> = Arc<dyn Fn(RowParams<C>) -> Option<R> + Send + Sync>;

/// Replaces how a row's cells are produced.
///
/// The scope can run the built-in algorithm ([`CellRangeScope::render`]) or run it over a subset
/// of columns ([`CellRangeScope::render_columns`]); the override may post-process the result.
/// Returned cells must stay sorted by column.
pub type CellRangeRenderer<C> = Arc<dyn Fn(CellRangeScope<'_, C>) -> Vec<Arc<C>> + Send + Sync>;

/// How rows are composed around their cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowLayout {
    /// Every row is absolutely positioned inside the grid at its offset; cells are absolutely
    /// positioned inside their row.
    #[default]
    Positioned,
    /// Rows are relatively positioned and stack in order, carrying only their height; cells are
    /// absolutely positioned inside their row (table-like output).
    Flowed,
}

/// Configuration for [`crate::GridRangeRenderer`].
///
/// Cheap to clone: renderers are stored in `Arc`s, so hosts can swap one of them and call
/// `GridRangeRenderer::set_options` without reallocating the others.
pub struct RendererOptions<C, R = RowContainer<C>> {
    pub cell_renderer: CellRenderer<C>,
    pub row_renderer: RowRenderer<C, R>,
    pub cell_range_renderer: Option<CellRangeRenderer<C>>,
    pub layout: RowLayout,
}

impl<C, R> Clone for RendererOptions<C, R> {
    fn clone(&self) -> Self {
        Self {
            cell_renderer: Arc::clone(&self.cell_renderer),
            row_renderer: Arc::clone(&self.row_renderer),
            cell_range_renderer: self.cell_range_renderer.clone(),
            layout: self.layout,
        }
    }
}

impl<C: 'static> RendererOptions<C, RowContainer<C>> {
    /// Creates options that wrap each row's cells in a [`RowContainer`].
    pub fn new(cell_renderer: impl Fn(&CellParams) -> Option<C> + Send + Sync + 'static) -> Self {
        Self {
            cell_renderer: Arc::new(cell_renderer),
            row_renderer: Arc::new(|params: RowParams<C>| Some(RowContainer::from(params))),
            cell_range_renderer: None,
            layout: RowLayout::Positioned,
        }
    }
}

impl<C, R> RendererOptions<C, R> {
    /// Creates options with a custom row renderer.
    pub fn new_with_row_renderer(
        cell_renderer: impl Fn(&CellParams) -> Option<C> + Send + Sync + 'static,
        row_renderer: impl Fn(RowParams<C>) -> Option<R> + Send + Sync + 'static,
    ) -> Self {
        Self {
            cell_renderer: Arc::new(cell_renderer),
            row_renderer: Arc::new(row_renderer),
            cell_range_renderer: None,
            layout: RowLayout::Positioned,
        }
    }

    pub fn with_cell_renderer(
        mut self,
        cell_renderer: impl Fn(&CellParams) -> Option<C> + Send + Sync + 'static,
    ) -> Self {
        self.cell_renderer = Arc::new(cell_renderer);
        self
    }

    pub fn with_row_renderer<R2>(
        self,
        row_renderer: impl Fn(RowParams<C>) -> Option<R2> + Send + Sync + 'static,
    ) -> RendererOptions<C, R2> {
        RendererOptions {
            cell_renderer: self.cell_renderer,
            row_renderer: Arc::new(row_renderer),
            cell_range_renderer: self.cell_range_renderer,
            layout: self.layout,
        }
    }

    pub fn with_cell_range_renderer(
        mut self,
        cell_range_renderer: Option<
            impl Fn(CellRangeScope<'_, C>) -> Vec<Arc<C>> + Send + Sync + 'static,
        >,
    ) -> Self {
        self.cell_range_renderer =
            cell_range_renderer.map(|f| Arc::new(f) as CellRangeRenderer<C>);
        self
    }

    pub fn with_layout(mut self, layout: RowLayout) -> Self {
        self.layout = layout;
        self
    }

    /// `true` if both options share the same renderer closures.
    pub(crate) fn same_renderers(&self, other: &Self) -> bool {
        let cell_range_unchanged = match (&self.cell_range_renderer, &other.cell_range_renderer) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        Arc::ptr_eq(&self.cell_renderer, &other.cell_renderer)
            && Arc::ptr_eq(&self.row_renderer, &other.row_renderer)
            && cell_range_unchanged
    }
}

impl<C, R> core::fmt::Debug for RendererOptions<C, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RendererOptions")
            .field("layout", &self.layout)
            .field(
                "has_cell_range_renderer",
                &self.cell_range_renderer.is_some(),
            )
            .finish_non_exhaustive()
    }
}
