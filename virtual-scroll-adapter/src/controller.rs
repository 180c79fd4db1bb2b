use core::cell::Cell;
use std::sync::Arc;

use virtual_scroll::{
    Align, CacheKey, ContainerStyle, FrameState, ItemPositions, ItemStyle, MeasurementCache,
    ScrollPhase, ScrollState, Window, compute_window, container_style, fixed_item_style,
};

use crate::{ControllerOptions, Layout, Placement, RenderedItem, render_window};

/// A framework-neutral scroll-state controller.
///
/// It owns the current scroll offset, the position index for dynamic layouts and the most
/// recently computed [`Window`]. Adapters drive it by calling:
/// - `on_scroll` for every scroll event (or `record_scroll` + `flush` when rate limiting)
/// - `set_container_height` on resize
/// - `measure` after laying out items whose real height differs from the estimate
///
/// The position index is rebuilt only when the item count or item heights change, never on a
/// plain scroll event.
#[derive(Clone, Debug)]
pub struct ScrollController<K = u64> {
    options: ControllerOptions<K>,
    positions: ItemPositions,
    scroll_offset: f64,
    phase: ScrollPhase,
    window: Window,
    measurements: MeasurementCache<K>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<K: CacheKey> ScrollController<K> {
    pub fn new(options: ControllerOptions<K>) -> Self {
        vdebug!(
            item_count = options.layout.item_count(),
            initial_offset = options.initial_offset,
            "ScrollController::new"
        );
        let mut c = Self {
            positions: ItemPositions::new(),
            scroll_offset: options.initial_offset,
            phase: ScrollPhase::Idle,
            window: Window::empty(),
            measurements: MeasurementCache::new(options.measurement_cache_capacity),
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        c.rebuild_positions();
        c.recompute();
        c
    }

    pub fn options(&self) -> &ControllerOptions<K> {
        &self.options
    }

    pub fn layout(&self) -> &Layout {
        &self.options.layout
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_scrolling(&self) -> bool {
        self.phase == ScrollPhase::Scrolling
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn item_count(&self) -> usize {
        self.options.layout.item_count()
    }

    pub fn container_height(&self) -> f64 {
        self.options.layout.container_height()
    }

    pub fn total_height(&self) -> f64 {
        self.window.total_height
    }

    /// The position index of a dynamic layout, `None` for fixed layouts.
    pub fn positions(&self) -> Option<&ItemPositions> {
        match self.options.layout {
            Layout::Fixed(_) => None,
            Layout::Dynamic(_) => Some(&self.positions),
        }
    }

    pub fn measurement_cache(&self) -> &MeasurementCache<K> {
        &self.measurements
    }

    pub fn key_for(&self, index: usize) -> K {
        (self.options.get_item_key)(index)
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Window, ScrollPhase) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(&self.window, self.phase);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// A resize usually arrives together with a scroll offset; without batching each setter
    /// notifies, which is wasteful when the subscriber re-renders.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    /// Handles a scroll event: records the offset and recomputes the window synchronously.
    pub fn on_scroll(&mut self, scroll_offset: f64) -> Window {
        if scroll_offset == self.scroll_offset && self.phase == ScrollPhase::Idle {
            return self.window;
        }
        self.batch_update(|c| {
            c.record_scroll(scroll_offset);
            c.flush();
        });
        self.window
    }

    /// Records a scroll offset without recomputing the window (Idle -> Scrolling).
    ///
    /// Use together with a [`crate::Throttle`]d or [`crate::Debounce`]d `flush` when scroll
    /// events arrive faster than windows need to be derived.
    pub fn record_scroll(&mut self, scroll_offset: f64) {
        vtrace!(scroll_offset, "record_scroll");
        self.scroll_offset = scroll_offset;
        if self.phase != ScrollPhase::Scrolling {
            self.phase = ScrollPhase::Scrolling;
            self.notify();
        }
    }

    /// Derives the window for the latest recorded offset (Scrolling -> Idle).
    ///
    /// Does nothing when no scroll is pending.
    pub fn flush(&mut self) -> Window {
        if self.phase == ScrollPhase::Idle {
            return self.window;
        }
        self.recompute();
        self.phase = ScrollPhase::Idle;
        self.notify();
        self.window
    }

    pub fn set_container_height(&mut self, container_height: f64) {
        if self.options.layout.container_height() == container_height {
            return;
        }
        self.options.layout.set_container_height(container_height);
        self.refresh();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.layout.overscan() == overscan {
            return;
        }
        self.options.layout.set_overscan(overscan);
        self.refresh();
    }

    /// Changes the item count. Heights of items that remain are kept.
    pub fn set_item_count(&mut self, item_count: usize) {
        if self.item_count() == item_count {
            return;
        }
        self.options.layout.set_item_count(item_count);
        if let Layout::Dynamic(_) = self.options.layout {
            let Self {
                options,
                positions,
                measurements,
                ..
            } = self;
            positions.resize_with(item_count, |i| {
                measured_or_estimate(options, measurements, i)
            });
        }
        self.refresh();
    }

    /// Fixed layouts: sets the item height. Dynamic layouts: sets the estimated item height
    /// used to size the leading overscan.
    pub fn set_item_height(&mut self, item_height: f64) {
        match &mut self.options.layout {
            Layout::Fixed(l) => {
                if l.item_height == item_height {
                    return;
                }
                l.item_height = item_height;
            }
            Layout::Dynamic(l) => {
                if l.estimated_item_height == item_height {
                    return;
                }
                l.estimated_item_height = item_height;
            }
        }
        self.refresh();
    }

    /// Replaces the height source for unmeasured items and rebuilds the position index.
    pub fn set_heights_with(&mut self, f: impl Fn(usize) -> f64 + Send + Sync + 'static) {
        self.options.get_item_height = Arc::new(f);
        self.rebuild_positions();
        self.refresh();
    }

    pub fn set_item_key(&mut self, f: impl Fn(usize) -> K + Send + Sync + 'static) {
        self.options.get_item_key = Arc::new(f);
        self.sync_item_keys();
    }

    /// Rebuilds per-index heights from the measurement cache and current key mapping.
    ///
    /// Call this after the data set was reordered while the count stayed the same.
    pub fn sync_item_keys(&mut self) {
        self.rebuild_positions();
        self.refresh();
    }

    /// Records the measured height of a rendered item (dynamic layouts only).
    ///
    /// If the item starts above the current scroll offset, the offset is shifted by the size
    /// delta so the visible content does not jump. Returns the applied scroll adjustment.
    pub fn measure(&mut self, index: usize, height: f64) -> f64 {
        if matches!(self.options.layout, Layout::Fixed(_)) || index >= self.positions.len() {
            vdebug!(index, "measure: ignored");
            return 0.0;
        }
        let key = self.key_for(index);
        self.measurements.put(key, height);

        let start = self.positions.position(index).unwrap_or(0.0);
        let delta = self.positions.set_height(index, height);
        if delta == 0.0 {
            return 0.0;
        }

        let adjust = if start < self.scroll_offset { delta } else { 0.0 };
        vtrace!(index, height, delta, adjust, "measure");
        self.scroll_offset = (self.scroll_offset + adjust).max(0.0);
        self.refresh();
        adjust
    }

    /// Applies many measurements with a single notification. Returns the total adjustment.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, f64)>) -> f64 {
        let mut applied = 0.0;
        self.batch_update(|c| {
            for (index, height) in measurements {
                applied += c.measure(index, height);
            }
        });
        applied
    }

    pub fn reset_measurements(&mut self) {
        self.measurements.clear();
        self.rebuild_positions();
        self.refresh();
    }

    pub fn item_start(&self, index: usize) -> Option<f64> {
        match self.options.layout {
            Layout::Fixed(l) => {
                (index < l.item_count).then(|| fixed_item_style(index, l.item_height).top)
            }
            Layout::Dynamic(_) => self.positions.position(index),
        }
    }

    pub fn item_height(&self, index: usize) -> Option<f64> {
        match self.options.layout {
            Layout::Fixed(l) => (index < l.item_count).then(|| l.item_height.max(0.0)),
            Layout::Dynamic(_) => self.positions.height(index),
        }
    }

    pub fn item_style(&self, index: usize) -> Option<ItemStyle> {
        self.placement().item_style(index)
    }

    pub fn container_style(&self) -> ContainerStyle {
        container_style(self.total_height())
    }

    /// How rendered items are positioned for the current layout.
    pub fn placement(&self) -> Placement<'_> {
        match self.options.layout {
            Layout::Fixed(l) => Placement::Fixed {
                item_count: l.item_count,
                item_height: l.item_height,
            },
            Layout::Dynamic(_) => Placement::Dynamic(&self.positions),
        }
    }

    /// Renders the current window over `items`, see [`render_window`].
    pub fn render<T, Key, R>(
        &self,
        items: &[T],
        get_item_key: impl FnMut(&T, usize) -> Key,
        render_item: impl FnMut(&T, usize) -> R,
    ) -> Vec<RenderedItem<Key, R>> {
        render_window(items, &self.window, self.placement(), get_item_key, render_item)
    }

    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_height() - self.container_height().max(0.0)).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_scroll_offset())
    }

    /// Computes the (clamped) offset that brings `index` into view with the given alignment.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> f64 {
        let Some(last) = self.item_count().checked_sub(1) else {
            return 0.0;
        };
        let index = index.min(last);
        let start = self.item_start(index).unwrap_or(0.0);
        let size = self.item_height(index).unwrap_or(0.0);
        let end = start + size;
        let view = self.container_height().max(0.0);

        let target = match align {
            Align::Start => start,
            Align::End => end - view,
            Align::Center => start + size / 2.0 - view / 2.0,
            Align::Auto => {
                let cur = self.scroll_offset;
                if start >= cur && end <= cur + view {
                    cur
                } else if start < cur {
                    start
                } else {
                    end - view
                }
            }
        };

        self.clamp_scroll_offset(target)
    }

    /// Programmatically scrolls to an index and returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> f64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.on_scroll(offset);
        offset
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
            phase: self.phase,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            container_height: self.container_height(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores geometry and scroll offset from a snapshot with a single notification.
    ///
    /// A snapshot taken mid-scroll is flushed, so the controller ends up idle.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.batch_update(|c| {
            c.set_container_height(frame.container_height);
            c.record_scroll(c.clamp_scroll_offset(frame.scroll.offset));
            c.flush();
        });
    }

    fn refresh(&mut self) {
        self.recompute();
        self.notify();
    }

    fn recompute(&mut self) {
        self.window = match &self.options.layout {
            Layout::Fixed(l) => compute_window(self.scroll_offset, l),
            Layout::Dynamic(l) => self.positions.window(self.scroll_offset, l),
        };
    }

    fn rebuild_positions(&mut self) {
        let Layout::Dynamic(l) = self.options.layout else {
            self.positions = ItemPositions::new();
            return;
        };
        let positions = ItemPositions::build(l.item_count, |i| {
            measured_or_estimate(&self.options, &self.measurements, i)
        });
        self.positions = positions;
    }
}

fn measured_or_estimate<K: CacheKey>(
    options: &ControllerOptions<K>,
    measurements: &MeasurementCache<K>,
    index: usize,
) -> f64 {
    let key = (options.get_item_key)(index);
    measurements
        .peek(&key)
        .unwrap_or_else(|| (options.get_item_height)(index))
}
