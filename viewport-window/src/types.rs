use alloc::sync::Arc;
use core::fmt;
use core::ops::Deref;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// A contiguous run of logical row indexes.
///
/// `end_index` is exclusive, so an empty window is any range with
/// `start_index >= end_index` (typically `0..0` for an empty row model).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    /// Builds a range from inclusive bounds.
    pub fn inclusive(start: usize, end: usize) -> Self {
        Self {
            start_index: start,
            end_index: end.saturating_add(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    /// Inclusive last index, or `None` when nothing is visible.
    pub fn last(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end_index - 1)
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index.max(self.start_index)
    }
}

/// Stable identity of a grid column.
///
/// Cloning is a reference-count bump, so column ids can be stored per cell without copying the
/// underlying string.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(Arc<str>);

impl ColumnId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ColumnId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<alloc::string::String> for ColumnId {
    fn from(id: alloc::string::String) -> Self {
        Self(Arc::from(id))
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lightweight, serializable snapshot of the window manager state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, which lets a host
/// persist the scroll position across sessions and feed it back through
/// [`crate::WindowManager::restore_state`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WindowState {
    pub enabled: bool,
    pub scroll_offset: u64,
    pub container_height: u32,
    pub row_height: u32,
    pub buffer_size: usize,
    pub visible_range: VisibleRange,
    pub virtual_scrolling_enabled: bool,
}
