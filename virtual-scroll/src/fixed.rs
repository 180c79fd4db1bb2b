use crate::FixedLayout;
use crate::types::{Window, overscan_as_isize, sanitize_extent, sanitize_offset};

/// Computes the window to render for a fixed item height.
///
/// - `start_index = max(0, floor(scroll_offset / item_height) - overscan)`
/// - `end_index = min(item_count - 1, ceil((scroll_offset + container_height) / item_height) + overscan)`
/// - `offset_y = start_index * item_height`
/// - `total_height = item_count * item_height`
///
/// Out-of-range scroll offsets (fling/overscroll) are tolerated: for a non-empty list the
/// window always stays within `0..item_count` and is never empty. A zero item height collapses
/// every item onto offset 0, so the whole list is returned.
pub fn compute_window(scroll_offset: f64, layout: &FixedLayout) -> Window {
    let count = layout.item_count;
    if count == 0 {
        return Window::empty();
    }

    if layout.item_height.is_nan() || layout.item_height < 0.0 {
        vwarn!(item_height = layout.item_height, "compute_window: invalid item height");
    }
    let item_height = sanitize_extent(layout.item_height);
    let total_height = count as f64 * item_height;
    let last = count - 1;
    if item_height == 0.0 {
        return Window::new(0, last, 0.0, total_height);
    }

    let scroll_offset = sanitize_offset(scroll_offset);
    let container_height = sanitize_extent(layout.container_height);
    let overscan = overscan_as_isize(layout.overscan);

    // Float -> int casts saturate, so huge offsets cannot wrap.
    let first = (scroll_offset / item_height).floor() as isize;
    let after = ((scroll_offset + container_height) / item_height).ceil() as isize;

    let start = clamp_index(first.saturating_sub(overscan), 0, last);
    let end = clamp_index(after.saturating_add(overscan), start, last);

    vtrace!(scroll_offset, start, end, "compute_window");
    Window::new(start, end, start as f64 * item_height, total_height)
}

fn clamp_index(index: isize, min: usize, max: usize) -> usize {
    if index <= 0 {
        return min;
    }
    (index as usize).clamp(min, max)
}
