use crate::types::{Window, sanitize_extent, sanitize_offset};
use crate::{DynamicLayout, ItemPositions};

/// Output of [`compute_dynamic_window`]: the window plus the position index it was computed
/// from, so callers can keep the index for later scroll ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicWindow {
    pub window: Window,
    pub item_positions: ItemPositions,
}

/// Builds the position index for `layout.item_count` items and computes the window for
/// `scroll_offset` in one go.
///
/// This is `O(n)` because every height is visited. On scroll ticks where neither the item
/// count nor the heights changed, call [`ItemPositions::window`] on the retained index instead.
pub fn compute_dynamic_window(
    scroll_offset: f64,
    layout: &DynamicLayout,
    get_item_height: impl FnMut(usize) -> f64,
) -> DynamicWindow {
    let item_positions = ItemPositions::build(layout.item_count, get_item_height);
    let window = item_positions.window(scroll_offset, layout);
    DynamicWindow {
        window,
        item_positions,
    }
}

impl ItemPositions {
    /// Computes the window to render for `scroll_offset` against this index.
    ///
    /// The item count is taken from the index; `layout.item_count` only matters when building.
    ///
    /// - Start: the item covering `scroll_offset - estimated_item_height * overscan`, minus
    ///   `overscan`, clamped to 0.
    /// - End: the first item at or after the start whose top lies below
    ///   `scroll_offset + container_height`, plus `overscan`, clamped to the last index. When no
    ///   item starts below the viewport, the last index.
    /// - `offset_y` is the position of the start item.
    ///
    /// Both searches are binary searches over the non-decreasing positions, `O(log n)`.
    pub fn window(&self, scroll_offset: f64, layout: &DynamicLayout) -> Window {
        let Some(last) = self.len().checked_sub(1) else {
            return Window::empty();
        };
        if layout.item_count != self.len() {
            vdebug!(
                layout_count = layout.item_count,
                indexed = self.len(),
                "ItemPositions::window: layout count differs from index"
            );
        }

        let scroll_offset = sanitize_offset(scroll_offset);
        let estimated = sanitize_extent(layout.estimated_item_height);
        let container_height = sanitize_extent(layout.container_height);
        let overscan = layout.overscan;

        let threshold = scroll_offset - estimated * overscan as f64;
        let start = self
            .index_at_offset(threshold)
            .unwrap_or(0)
            .saturating_sub(overscan);

        let viewport_end = scroll_offset + container_height;
        let below = self.first_starting_after(start, viewport_end);
        let end = if below > last {
            last
        } else {
            below.saturating_add(overscan).min(last)
        };

        vtrace!(scroll_offset, start, end, "ItemPositions::window");
        let offset_y = self.position(start).unwrap_or(0.0);
        Window::new(start, end, offset_y, self.total_height())
    }
}
