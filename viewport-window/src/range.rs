//! Pure range math: which rows a viewport needs, and where to scroll to reveal a row.
//!
//! Nothing here touches a render surface, so every function is O(1) and trivially testable.

use crate::{Align, VisibleRange};

/// Computes the rows to materialize for a viewport over fixed-height rows.
///
/// The strictly visible rows are widened by `buffer_size` on both sides and clamped to the
/// row model. An empty row model (or a zero `row_height`) yields an empty range.
///
/// Offsets past the end of the content clamp `start` to the last row, so the returned range
/// always satisfies `start <= end + 1` with both bounds inside `0..row_count`.
pub fn compute_visible_range(
    scroll_offset: u64,
    container_height: u32,
    row_height: u32,
    buffer_size: usize,
    row_count: usize,
) -> VisibleRange {
    if row_count == 0 || row_height == 0 {
        return VisibleRange::EMPTY;
    }

    let row_height = row_height as u64;
    let last = row_count - 1;
    let buffer = buffer_size as u64;

    let first_visible = scroll_offset / row_height;
    let start = first_visible.saturating_sub(buffer);

    let bottom = scroll_offset.saturating_add(container_height as u64);
    let last_visible = bottom.div_ceil(row_height);
    let end = last_visible.saturating_add(buffer);

    let end = clamp_index(end, last);
    let start = clamp_index(start, last).min(end);
    VisibleRange::inclusive(start, end)
}

/// The range covering every row, used when virtual scrolling is off.
pub fn full_range(row_count: usize) -> VisibleRange {
    VisibleRange::new(0, row_count)
}

/// Total scrollable content height for `row_count` rows.
pub fn content_extent(row_count: usize, row_height: u32) -> u64 {
    (row_count as u64).saturating_mul(row_height as u64)
}

/// Largest scroll offset that still fills the container.
pub fn max_scroll_offset(row_count: usize, row_height: u32, container_height: u32) -> u64 {
    content_extent(row_count, row_height).saturating_sub(container_height as u64)
}

/// Computes the scroll offset that brings `index` into view with the requested alignment.
///
/// `index` is clamped to the last row. The result is clamped to `[0, max_scroll_offset]`.
/// With [`Align::Auto`] the current offset is kept when the row is already fully visible,
/// otherwise the nearest edge is aligned.
pub fn scroll_to_row_offset(
    index: usize,
    align: Align,
    current_offset: u64,
    container_height: u32,
    row_height: u32,
    row_count: usize,
) -> u64 {
    if row_count == 0 || row_height == 0 {
        return 0;
    }
    let index = index.min(row_count - 1);
    let row_h = row_height as u64;
    let view = container_height as u64;
    let row_start = (index as u64).saturating_mul(row_h);
    let row_end = row_start.saturating_add(row_h);

    let target = match align {
        Align::Start => row_start,
        Align::End => row_end.saturating_sub(view),
        Align::Center => row_start
            .saturating_add(row_h / 2)
            .saturating_sub(view / 2),
        Align::Auto => {
            let cur_end = current_offset.saturating_add(view);
            if row_start >= current_offset && row_end <= cur_end {
                current_offset
            } else if row_start < current_offset {
                row_start
            } else {
                row_end.saturating_sub(view)
            }
        }
    };

    target.min(max_scroll_offset(row_count, row_height, container_height))
}

fn clamp_index(value: u64, last: usize) -> usize {
    usize::try_from(value).map_or(last, |v| v.min(last))
}
