use alloc::vec::Vec;

use crate::VisibleRange;
use crate::error::RowError;

/// The work needed to move a window from its materialized set to a new range.
///
/// Both lists are sorted ascending and free of duplicates. Apply `to_destroy` before
/// `to_create`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub to_create: Vec<usize>,
    pub to_destroy: Vec<usize>,
}

impl ReconcilePlan {
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_destroy.is_empty()
    }
}

/// Diffs a new range against the indexes that are currently materialized.
///
/// `materialized` may arrive in any order; duplicates are ignored.
pub fn reconcile(
    new_range: VisibleRange,
    materialized: impl IntoIterator<Item = usize>,
) -> ReconcilePlan {
    let mut present: Vec<usize> = materialized.into_iter().collect();
    present.sort_unstable();
    present.dedup();

    let to_destroy = present
        .iter()
        .copied()
        .filter(|&i| !new_range.contains(i))
        .collect();

    // Walk the range and the sorted set together so the diff stays O(window + set).
    let mut to_create = Vec::with_capacity(new_range.len());
    let mut cursor = present.partition_point(|&i| i < new_range.start_index);
    for i in new_range.iter() {
        while cursor < present.len() && present[cursor] < i {
            cursor += 1;
        }
        if cursor < present.len() && present[cursor] == i {
            continue;
        }
        to_create.push(i);
    }

    ReconcilePlan {
        to_create,
        to_destroy,
    }
}

/// What a driver call actually did to the window.
#[derive(Debug)]
pub struct ReconcileReport<E> {
    /// The range the window was reconciled against.
    pub range: VisibleRange,
    pub created: Vec<usize>,
    pub destroyed: Vec<usize>,
    /// Cells whose value was pushed by [`crate::WindowManager::refresh_values`].
    pub updated: usize,
    /// Rows whose create hook failed. They were rolled back and will be retried.
    pub failed: Vec<RowError<E>>,
}

impl<E> ReconcileReport<E> {
    pub(crate) fn unchanged(range: VisibleRange) -> Self {
        Self {
            range,
            created: Vec::new(),
            destroyed: Vec::new(),
            updated: 0,
            failed: Vec::new(),
        }
    }

    /// `true` when no create hook failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
            && self.destroyed.is_empty()
            && self.updated == 0
            && self.failed.is_empty()
    }
}
