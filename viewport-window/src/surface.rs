use crate::ColumnId;

/// Read-only row/column data the window is built over.
///
/// The model must stay stable between a range computation and the reconciliation that follows
/// it; row insertions should be announced through [`crate::WindowManager::on_rows_changed`].
pub trait RowModel {
    type Row;
    type Value;

    fn row_count(&self) -> usize;

    fn row_at(&self, index: usize) -> Self::Row;

    fn value_at(&self, index: usize, column: &ColumnId) -> Self::Value;

    /// Column ids in display order. One cell is materialized per column.
    fn columns(&self) -> &[ColumnId];
}

/// The write side: turns row/cell handles into visible output.
///
/// The window manager owns every handle it receives and hands each one back exactly once,
/// either to [`RenderSurface::destroy_cell`] or [`RenderSurface::destroy_row`].
pub trait RenderSurface {
    type Row;
    type Value;
    type RowHandle;
    type CellHandle;
    type Error: core::fmt::Debug;

    fn create_row(&mut self, index: usize, data: Self::Row) -> Result<Self::RowHandle, Self::Error>;

    fn create_cell(
        &mut self,
        row: &mut Self::RowHandle,
        column: &ColumnId,
        value: Self::Value,
    ) -> Result<Self::CellHandle, Self::Error>;

    /// Releases a cell handle. Called for every cell before its row is destroyed.
    ///
    /// The default simply drops the handle, which suits surfaces where cells are children of
    /// the row and go away with it.
    fn destroy_cell(&mut self, cell: Self::CellHandle) -> Result<(), Self::Error> {
        drop(cell);
        Ok(())
    }

    /// Releases a row handle. Failures are logged by the manager and otherwise ignored.
    fn destroy_row(&mut self, row: Self::RowHandle) -> Result<(), Self::Error>;

    fn update_cell_value(
        &mut self,
        cell: &mut Self::CellHandle,
        value: Self::Value,
    ) -> Result<(), Self::Error>;

    /// Hint for the total scrollable height so scrollbars stay accurate.
    fn set_content_extent(&mut self, total_height: u64);

    fn scroll_to(&mut self, offset: u64);
}
