use std::sync::Arc;

use virtual_scroll::{DynamicLayout, FixedLayout, ScrollPhase, Window};

/// A callback fired whenever the controller's window or scroll state changes.
pub type OnWindowChange = Arc<dyn Fn(&Window, ScrollPhase) + Send + Sync>;

/// Per-index height used for items that have not been measured yet.
pub type HeightFn = Arc<dyn Fn(usize) -> f64 + Send + Sync>;

/// Stable identity for the item at an index; measurements follow keys across reorders.
pub type KeyFn<K> = Arc<dyn Fn(usize) -> K + Send + Sync>;

/// Which windowing path the controller drives.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    Fixed(FixedLayout),
    Dynamic(DynamicLayout),
}

impl Layout {
    pub fn item_count(&self) -> usize {
        match self {
            Self::Fixed(l) => l.item_count,
            Self::Dynamic(l) => l.item_count,
        }
    }

    pub fn container_height(&self) -> f64 {
        match self {
            Self::Fixed(l) => l.container_height,
            Self::Dynamic(l) => l.container_height,
        }
    }

    pub fn overscan(&self) -> usize {
        match self {
            Self::Fixed(l) => l.overscan,
            Self::Dynamic(l) => l.overscan,
        }
    }

    pub(crate) fn set_item_count(&mut self, item_count: usize) {
        match self {
            Self::Fixed(l) => l.item_count = item_count,
            Self::Dynamic(l) => l.item_count = item_count,
        }
    }

    pub(crate) fn set_container_height(&mut self, container_height: f64) {
        match self {
            Self::Fixed(l) => l.container_height = container_height,
            Self::Dynamic(l) => l.container_height = container_height,
        }
    }

    pub(crate) fn set_overscan(&mut self, overscan: usize) {
        match self {
            Self::Fixed(l) => l.overscan = overscan,
            Self::Dynamic(l) => l.overscan = overscan,
        }
    }
}

/// Configuration for [`crate::ScrollController`].
///
/// Closures are stored in `Arc`s so options stay cheap to clone.
pub struct ControllerOptions<K = u64> {
    pub layout: Layout,
    /// Heights for unmeasured items in the dynamic path. Ignored by the fixed path.
    pub get_item_height: HeightFn,
    pub get_item_key: KeyFn<K>,
    pub on_change: Option<OnWindowChange>,
    pub initial_offset: f64,
    /// Upper bound on remembered measurements (key -> height).
    pub measurement_cache_capacity: usize,
}

impl<K> Clone for ControllerOptions<K> {
    fn clone(&self) -> Self {
        Self {
            layout: self.layout,
            get_item_height: Arc::clone(&self.get_item_height),
            get_item_key: Arc::clone(&self.get_item_key),
            on_change: self.on_change.clone(),
            initial_offset: self.initial_offset,
            measurement_cache_capacity: self.measurement_cache_capacity,
        }
    }
}

impl ControllerOptions<u64> {
    /// Options for a fixed-height list keyed by index.
    pub fn fixed(layout: FixedLayout) -> Self {
        let item_height = layout.item_height;
        Self::with_layout(Layout::Fixed(layout), move |_| item_height)
    }

    /// Options for a dynamic-height list keyed by index.
    ///
    /// `get_item_height(i)` supplies the height of item `i` until it is measured; returning
    /// `layout.estimated_item_height` for every index is a reasonable default.
    pub fn dynamic(
        layout: DynamicLayout,
        get_item_height: impl Fn(usize) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::with_layout(Layout::Dynamic(layout), get_item_height)
    }

    fn with_layout(
        layout: Layout,
        get_item_height: impl Fn(usize) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            layout,
            get_item_height: Arc::new(get_item_height),
            get_item_key: Arc::new(|i| i as u64),
            on_change: None,
            initial_offset: 0.0,
            measurement_cache_capacity: 4096,
        }
    }
}

impl<K> ControllerOptions<K> {
    /// Replaces the key mapping. Use this when measurements should follow items across
    /// reordering/replacement.
    pub fn with_item_key<K2>(
        self,
        get_item_key: impl Fn(usize) -> K2 + Send + Sync + 'static,
    ) -> ControllerOptions<K2> {
        ControllerOptions {
            layout: self.layout,
            get_item_height: self.get_item_height,
            get_item_key: Arc::new(get_item_key),
            on_change: self.on_change,
            initial_offset: self.initial_offset,
            measurement_cache_capacity: self.measurement_cache_capacity,
        }
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Window, ScrollPhase) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: f64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_measurement_cache_capacity(mut self, capacity: usize) -> Self {
        self.measurement_cache_capacity = capacity;
        self
    }
}

impl<K> core::fmt::Debug for ControllerOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControllerOptions")
            .field("layout", &self.layout)
            .field("initial_offset", &self.initial_offset)
            .field(
                "measurement_cache_capacity",
                &self.measurement_cache_capacity,
            )
            .finish_non_exhaustive()
    }
}
