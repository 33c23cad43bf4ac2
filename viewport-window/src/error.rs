//! Error types for the window manager.

/// Rejected configuration values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("row height must be a positive pixel count, got {0}")]
    InvalidRowHeight(i64),

    #[error("buffer size must be a non-negative row count, got {0}")]
    NegativeBufferSize(i64),
}

/// Errors returned by [`crate::WindowManager`] driver calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// The manager was torn down; no further surface calls are made.
    #[error("window manager has been torn down")]
    TornDown,
}

/// A render-surface create hook failed for one row.
///
/// The row was rolled back (no handle of it remains) and stays unmaterialized until the next
/// reconciliation pass retries it.
#[derive(Debug, thiserror::Error)]
#[error("failed to materialize row {index}")]
pub struct RowError<E> {
    pub index: usize,
    #[source]
    pub source: E,
}
