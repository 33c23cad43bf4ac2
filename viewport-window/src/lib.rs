//! A headless row-windowing engine for virtualized data grids.
//!
//! Grids with hundreds of thousands of rows cannot afford one visual node per row. This crate
//! keeps a sliding window of materialized rows (and their cells) over a large logical row
//! model: it computes which rows a viewport needs, diffs that against what is already
//! materialized, and drives an abstract render surface to destroy rows that scrolled out and
//! create rows that scrolled in.
//!
//! It is UI-agnostic. A DOM/TUI/GPU layer is expected to provide:
//! - a [`RowModel`] (row count, row data, cell values, column ids)
//! - a [`RenderSurface`] (create/update/destroy visual handles, content-extent hint)
//! - scroll offset and container height notifications
//!
//! The pure parts ([`compute_visible_range`], [`reconcile`]) are usable on their own.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod manager;
mod options;
mod range;
mod reconcile;
mod registry;
mod surface;
mod types;


pub use error::{ConfigError, RowError, WindowError};
pub use manager::WindowManager;
pub use options::{DEFAULT_BUFFER_SIZE, DEFAULT_ROW_HEIGHT, WindowConfig, WindowOptions};
pub use range::{
    compute_visible_range, content_extent, full_range, max_scroll_offset, scroll_to_row_offset,
};
pub use reconcile::{ReconcilePlan, ReconcileReport, reconcile};
pub use registry::{HandleRegistry, RowEntry};
pub use surface::{RenderSurface, RowModel};
pub use types::{Align, ColumnId, VisibleRange, WindowState};
