use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::{ColumnId, RenderSurface};

/// A materialized row: its handle plus one handle per column, in column order.
#[derive(Debug)]
pub struct RowEntry<R, C> {
    handle: R,
    cells: Vec<(ColumnId, C)>,
}

impl<R, C> RowEntry<R, C> {
    pub(crate) fn new(handle: R, cells: Vec<(ColumnId, C)>) -> Self {
        Self { handle, cells }
    }

    pub fn handle(&self) -> &R {
        &self.handle
    }

    pub fn cell(&self, column: &str) -> Option<&C> {
        self.cells
            .iter()
            .find(|(id, _)| id.as_str() == column)
            .map(|(_, c)| c)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&ColumnId, &C)> {
        self.cells.iter().map(|(id, c)| (id, c))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = (&ColumnId, &mut C)> {
        self.cells.iter_mut().map(|(id, c)| (&*id, c))
    }

    /// Hands every handle back to the surface: cells first, then the row.
    ///
    /// Destroy hooks are best-effort; a failure is logged and the remaining handles are still
    /// released.
    pub(crate) fn destroy<S>(self, _index: usize, surface: &mut S)
    where
        S: RenderSurface<RowHandle = R, CellHandle = C> + ?Sized,
    {
        for (_column, cell) in self.cells {
            if let Err(_err) = surface.destroy_cell(cell) {
                wwarn!(index = _index, column = %_column, error = ?_err, "destroy_cell failed");
            }
        }
        if let Err(_err) = surface.destroy_row(self.handle) {
            wwarn!(index = _index, error = ?_err, "destroy_row failed");
        }
    }
}

/// Row index → row handle, and (row, column) → cell handle.
///
/// Cells live inside their row entry, so a cell can never be registered without its row. Only
/// the window manager mutates the registry; everything public here is a read.
#[derive(Debug)]
pub struct HandleRegistry<R, C> {
    rows: BTreeMap<usize, RowEntry<R, C>>,
}

impl<R, C> Default for HandleRegistry<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, C> HandleRegistry<R, C> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(&index).map(RowEntry::handle)
    }

    pub fn get_cell(&self, index: usize, column: &str) -> Option<&C> {
        self.rows.get(&index)?.cell(column)
    }

    pub fn entry(&self, index: usize) -> Option<&RowEntry<R, C>> {
        self.rows.get(&index)
    }

    pub fn is_materialized(&self, index: usize) -> bool {
        self.rows.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Materialized row indexes, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.keys().copied()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.values().map(RowEntry::cell_count).sum()
    }

    /// Registers a fully built row.
    ///
    /// Inserting over an already-materialized index is refused and the entry is handed back so
    /// the caller can release its handles.
    pub(crate) fn insert(
        &mut self,
        index: usize,
        entry: RowEntry<R, C>,
    ) -> Result<(), RowEntry<R, C>> {
        if self.rows.contains_key(&index) {
            return Err(entry);
        }
        self.rows.insert(index, entry);
        Ok(())
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<RowEntry<R, C>> {
        self.rows.remove(&index)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut RowEntry<R, C>)> {
        self.rows.iter_mut().map(|(i, e)| (*i, e))
    }

    /// Destroys every handle and empties the registry. Returns the number of rows released.
    pub fn clear<S>(&mut self, surface: &mut S) -> usize
    where
        S: RenderSurface<RowHandle = R, CellHandle = C> + ?Sized,
    {
        let rows = core::mem::take(&mut self.rows);
        let n = rows.len();
        for (index, entry) in rows {
            entry.destroy(index, surface);
        }
        n
    }
}
