use virtual_scroll::{ItemPositions, ItemStyle, Window, dynamic_item_style, fixed_item_style};

/// How rendered items are placed inside the scroll container.
#[derive(Clone, Copy, Debug)]
pub enum Placement<'a> {
    Fixed { item_count: usize, item_height: f64 },
    Dynamic(&'a ItemPositions),
}

impl Placement<'_> {
    pub fn item_style(&self, index: usize) -> Option<ItemStyle> {
        match *self {
            Self::Fixed {
                item_count,
                item_height,
            } => (index < item_count).then(|| fixed_item_style(index, item_height)),
            Self::Dynamic(positions) => dynamic_item_style(index, positions),
        }
    }
}

/// One item of the window, ready for the UI layer to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedItem<Key, R> {
    pub key: Key,
    pub index: usize,
    pub style: ItemStyle,
    pub output: R,
}

/// Maps every index of `window` onto its item, key and style.
///
/// `render_item(item, index)` is called exactly once per rendered index, in ascending order.
/// Indexes the window holds but `items` or `placement` do not (a window computed for a stale
/// item count) are skipped.
pub fn render_window<T, Key, R>(
    items: &[T],
    window: &Window,
    placement: Placement<'_>,
    get_item_key: impl FnMut(&T, usize) -> Key,
    render_item: impl FnMut(&T, usize) -> R,
) -> Vec<RenderedItem<Key, R>> {
    let mut out = Vec::with_capacity(window.visible_count);
    render_window_into(items, window, placement, get_item_key, render_item, &mut out);
    out
}

/// Same as [`render_window`], but reuses `out` (cleared first) to avoid per-frame allocations.
pub fn render_window_into<T, Key, R>(
    items: &[T],
    window: &Window,
    placement: Placement<'_>,
    mut get_item_key: impl FnMut(&T, usize) -> Key,
    mut render_item: impl FnMut(&T, usize) -> R,
    out: &mut Vec<RenderedItem<Key, R>>,
) {
    out.clear();
    for index in window.range() {
        let (Some(item), Some(style)) = (items.get(index), placement.item_style(index)) else {
            vwarn!(index, len = items.len(), "render_window: index out of bounds");
            continue;
        };
        out.push(RenderedItem {
            key: get_item_key(item, index),
            index,
            style,
            output: render_item(item, index),
        });
    }
}
