use alloc::vec::Vec;
use core::fmt;

use crate::error::{RowError, WindowError};
use crate::range::{compute_visible_range, content_extent, full_range, scroll_to_row_offset};
use crate::reconcile::{ReconcileReport, reconcile};
use crate::registry::{HandleRegistry, RowEntry};
use crate::{Align, RenderSurface, RowModel, VisibleRange, WindowOptions, WindowState};

type Report<S> = ReconcileReport<<S as RenderSurface>::Error>;

/// A headless row-windowing engine.
///
/// The manager owns a render surface and the registry of every handle it created on it. Hosts
/// drive it with scroll, resize and data-change notifications, passing the row model by
/// reference on each call:
/// - `on_scroll` / `on_resize` / `apply_viewport` when the container moves or changes size
/// - `on_rows_changed` / `replace_dataset` / `refresh_values` when the data changes
/// - `teardown` (or drop) when the grid goes away
///
/// Each call recomputes the window, destroys rows that left it, then creates rows that entered
/// it. Every call runs to completion before returning, so reconciliations never overlap.
pub struct WindowManager<S: RenderSurface> {
    options: WindowOptions,
    scroll_offset: u64,
    container_height: u32,
    visible_range: VisibleRange,
    row_count: usize,

    registry: HandleRegistry<S::RowHandle, S::CellHandle>,
    surface: S,
    alive: bool,
}

impl<S: RenderSurface> WindowManager<S> {
    /// Binds a new, empty window to `surface`.
    ///
    /// Nothing is materialized until the first driver call (typically [`Self::mount`]).
    pub fn new(options: WindowOptions, surface: S) -> Self {
        let options = options.validated();
        wdebug!(
            row_height = options.row_height,
            buffer_size = options.buffer_size,
            virtual_scrolling = options.virtual_scrolling_enabled,
            enabled = options.enabled,
            "WindowManager::new"
        );
        Self {
            options,
            scroll_offset: 0,
            container_height: 0,
            visible_range: VisibleRange::EMPTY,
            row_count: 0,
            registry: HandleRegistry::new(),
            surface,
            alive: true,
        }
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn virtual_scrolling_enabled(&self) -> bool {
        self.options.virtual_scrolling_enabled
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn container_height(&self) -> u32 {
        self.container_height
    }

    /// The range the window was last reconciled against.
    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range
    }

    /// Row count observed during the last reconciliation.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Total content height for the last observed row count.
    pub fn content_extent(&self) -> u64 {
        content_extent(self.row_count, self.options.row_height)
    }

    pub fn registry(&self) -> &HandleRegistry<S::RowHandle, S::CellHandle> {
        &self.registry
    }

    pub fn get(&self, index: usize) -> Option<&S::RowHandle> {
        self.registry.get(index)
    }

    pub fn get_cell(&self, index: usize, column: &str) -> Option<&S::CellHandle> {
        self.registry.get_cell(index, column)
    }

    pub fn is_materialized(&self, index: usize) -> bool {
        self.registry.is_materialized(index)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface for host-side work that does not involve window handles.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns a lightweight snapshot of the current window state.
    pub fn state(&self) -> WindowState {
        WindowState {
            enabled: self.options.enabled,
            scroll_offset: self.scroll_offset,
            container_height: self.container_height,
            row_height: self.options.row_height,
            buffer_size: self.options.buffer_size,
            visible_range: self.visible_range,
            virtual_scrolling_enabled: self.options.virtual_scrolling_enabled,
        }
    }

    /// The range the window should cover for `row_count` rows with the current geometry.
    pub fn target_range(&self, row_count: usize) -> VisibleRange {
        if !self.options.enabled {
            return VisibleRange::EMPTY;
        }
        if !self.options.virtual_scrolling_enabled {
            return full_range(row_count);
        }
        compute_visible_range(
            self.scroll_offset,
            self.container_height,
            self.options.row_height,
            self.options.buffer_size,
            row_count,
        )
    }

    /// Performs the initial render against `model`.
    pub fn mount<M>(&mut self, model: &M) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.ensure_alive()?;
        wdebug!(rows = model.row_count(), "mount");
        Ok(self.rerange(model))
    }

    /// Handles a scroll position change from the host.
    ///
    /// Without virtual scrolling the offset is recorded but the window is left alone.
    pub fn on_scroll<M>(&mut self, model: &M, offset: u64) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.ensure_alive()?;
        wtrace!(offset, "on_scroll");
        self.scroll_offset = offset;
        Ok(self.rerange_for_viewport(model))
    }

    /// Handles a container size change from the host.
    ///
    /// Without virtual scrolling only the content-extent hint is refreshed.
    pub fn on_resize<M>(&mut self, model: &M, height: u32) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.ensure_alive()?;
        wtrace!(height, "on_resize");
        self.container_height = height;
        Ok(self.rerange_for_viewport(model))
    }

    /// Applies scroll offset and container height in a single reconciliation.
    ///
    /// Prefer this over `on_resize` + `on_scroll` when the host reports both together, since
    /// each of those would reconcile on its own.
    pub fn apply_viewport<M>(
        &mut self,
        model: &M,
        offset: u64,
        height: u32,
    ) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.ensure_alive()?;
        wtrace!(offset, height, "apply_viewport");
        self.scroll_offset = offset;
        self.container_height = height;
        Ok(self.rerange_for_viewport(model))
    }

    /// Reconciles after rows were inserted or removed.
    ///
    /// Rows at indexes past the new count fall outside the window and are destroyed.
    pub fn on_rows_changed<M>(&mut self, model: &M) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.ensure_alive()?;
        wdebug!(
            prev = self.row_count,
            next = model.row_count(),
            "on_rows_changed"
        );
        Ok(self.rerange(model))
    }

    /// Drops every handle and rebuilds the window from `model`.
    ///
    /// Use this when row identity by index no longer holds (sorting, a new dataset).
    pub fn replace_dataset<M>(&mut self, model: &M) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.ensure_alive()?;
        let destroyed: Vec<usize> = self.registry.indices().collect();
        self.registry.clear(&mut self.surface);
        wdebug!(cleared = destroyed.len(), "replace_dataset");
        let mut report = self.rerange(model);
        report.destroyed = destroyed;
        Ok(report)
    }

    /// Pushes fresh values from `model` into every materialized cell.
    ///
    /// Update failures are logged and skipped; `updated` counts the cells that took a value.
    pub fn refresh_values<M>(&mut self, model: &M) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.ensure_alive()?;
        let mut report = ReconcileReport::unchanged(self.visible_range);
        for (index, entry) in self.registry.iter_mut() {
            for (column, cell) in entry.cells_mut() {
                let value = model.value_at(index, column);
                match self.surface.update_cell_value(cell, value) {
                    Ok(()) => report.updated += 1,
                    Err(_err) => {
                        wwarn!(index, column = %column, error = ?_err, "update_cell_value failed");
                    }
                }
            }
        }
        Ok(report)
    }

    /// Scrolls the surface so that row `index` is visible, then reconciles.
    ///
    /// The target offset is clamped to the content; the applied offset is available through
    /// [`Self::scroll_offset`] afterwards.
    pub fn scroll_to_row<M>(
        &mut self,
        model: &M,
        index: usize,
        align: Align,
    ) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.ensure_alive()?;
        let offset = scroll_to_row_offset(
            index,
            align,
            self.scroll_offset,
            self.container_height,
            self.options.row_height,
            model.row_count(),
        );
        wtrace!(index, offset, "scroll_to_row");
        self.surface.scroll_to(offset);
        self.scroll_offset = offset;
        Ok(self.rerange_for_viewport(model))
    }

    /// Replaces the options and reconciles against them.
    ///
    /// Disabling the window releases every handle; switching virtual scrolling off
    /// materializes the whole model.
    pub fn set_options<M>(
        &mut self,
        model: &M,
        options: WindowOptions,
    ) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.ensure_alive()?;
        self.options = options.validated();
        wtrace!(
            row_height = self.options.row_height,
            buffer_size = self.options.buffer_size,
            virtual_scrolling = self.options.virtual_scrolling_enabled,
            enabled = self.options.enabled,
            "set_options"
        );
        Ok(self.rerange(model))
    }

    /// Copies the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options<M>(
        &mut self,
        model: &M,
        f: impl FnOnce(&mut WindowOptions),
    ) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        let mut next = self.options;
        f(&mut next);
        self.set_options(model, next)
    }

    pub fn set_enabled<M>(&mut self, model: &M, enabled: bool) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.update_options(model, |o| o.enabled = enabled)
    }

    pub fn set_virtual_scrolling_enabled<M>(
        &mut self,
        model: &M,
        enabled: bool,
    ) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.update_options(model, |o| o.virtual_scrolling_enabled = enabled)
    }

    /// Restores geometry and options from a previously captured snapshot.
    ///
    /// The snapshot's `visible_range` is not trusted; the window is recomputed from the
    /// restored geometry and the current model.
    pub fn restore_state<M>(
        &mut self,
        model: &M,
        state: WindowState,
    ) -> Result<Report<S>, WindowError>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        self.ensure_alive()?;
        self.scroll_offset = state.scroll_offset;
        self.container_height = state.container_height;
        let options = WindowOptions {
            row_height: state.row_height,
            buffer_size: state.buffer_size,
            virtual_scrolling_enabled: state.virtual_scrolling_enabled,
            enabled: state.enabled,
        };
        self.set_options(model, options)
    }

    /// Destroys every handle and retires the manager.
    ///
    /// Later driver calls return [`WindowError::TornDown`] without touching the surface.
    /// Returns the number of rows released; a second teardown releases nothing.
    pub fn teardown(&mut self) -> usize {
        if !self.alive {
            return 0;
        }
        self.alive = false;
        self.visible_range = VisibleRange::EMPTY;
        let released = self.registry.clear(&mut self.surface);
        wdebug!(released, "teardown");
        released
    }

    fn ensure_alive(&self) -> Result<(), WindowError> {
        if self.alive {
            Ok(())
        } else {
            Err(WindowError::TornDown)
        }
    }

    /// Scroll and resize entry point.
    ///
    /// Without virtual scrolling the full range is materialized once; after that the window
    /// does not move and only the extent hint is refreshed.
    fn rerange_for_viewport<M>(&mut self, model: &M) -> Report<S>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        if !self.options.enabled {
            return ReconcileReport::unchanged(self.visible_range);
        }
        if !self.options.virtual_scrolling_enabled {
            let row_count = model.row_count();
            // Rows that failed to create leave the registry short; rerange retries them.
            if self.visible_range == full_range(row_count) && self.registry.len() == row_count {
                self.row_count = row_count;
                self.surface.set_content_extent(self.content_extent());
                return ReconcileReport::unchanged(self.visible_range);
            }
        }
        self.rerange(model)
    }

    fn rerange<M>(&mut self, model: &M) -> Report<S>
    where
        M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
    {
        let row_count = model.row_count();
        self.row_count = row_count;
        let range = self.target_range(row_count);
        let plan = reconcile(range, self.registry.indices());

        let mut report = ReconcileReport::unchanged(range);
        if !plan.is_noop() {
            wdebug!(
                start = range.start_index,
                end = range.end_index,
                create = plan.to_create.len(),
                destroy = plan.to_destroy.len(),
                "reconcile"
            );
        }

        for index in plan.to_destroy {
            if let Some(entry) = self.registry.remove(index) {
                entry.destroy(index, &mut self.surface);
                report.destroyed.push(index);
            }
        }

        for index in plan.to_create {
            match materialize(&mut self.surface, model, index) {
                Ok(entry) => match self.registry.insert(index, entry) {
                    Ok(()) => report.created.push(index),
                    Err(dup) => dup.destroy(index, &mut self.surface),
                },
                Err(source) => {
                    wwarn!(index, error = ?source, "row create failed; rolled back");
                    report.failed.push(RowError { index, source });
                }
            }
        }

        self.visible_range = range;
        if self.options.enabled {
            self.surface.set_content_extent(self.content_extent());
        }
        report
    }
}

/// Creates a row and all of its cells, or nothing at all.
///
/// When a hook fails midway, the handles created so far are destroyed before the error is
/// returned.
fn materialize<S, M>(
    surface: &mut S,
    model: &M,
    index: usize,
) -> Result<RowEntry<S::RowHandle, S::CellHandle>, S::Error>
where
    S: RenderSurface,
    M: RowModel<Row = S::Row, Value = S::Value> + ?Sized,
{
    let mut row = surface.create_row(index, model.row_at(index))?;
    let columns = model.columns();
    let mut cells = Vec::with_capacity(columns.len());
    for column in columns {
        match surface.create_cell(&mut row, column, model.value_at(index, column)) {
            Ok(cell) => cells.push((column.clone(), cell)),
            Err(err) => {
                RowEntry::new(row, cells).destroy(index, surface);
                return Err(err);
            }
        }
    }
    Ok(RowEntry::new(row, cells))
}

impl<S: RenderSurface> Drop for WindowManager<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S: RenderSurface> fmt::Debug for WindowManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowManager")
            .field("options", &self.options)
            .field("scroll_offset", &self.scroll_offset)
            .field("container_height", &self.container_height)
            .field("visible_range", &self.visible_range)
            .field("row_count", &self.row_count)
            .field("materialized", &self.registry.len())
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}
