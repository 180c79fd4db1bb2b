/// Number of extra items rendered on each side of the visible span when no overscan is given.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Layout parameters for lists where every item has the same height.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedLayout {
    pub item_count: usize,
    pub item_height: f64,
    pub container_height: f64,
    pub overscan: usize,
}

impl FixedLayout {
    /// Creates a fixed layout with [`DEFAULT_OVERSCAN`].
    pub fn new(item_count: usize, item_height: f64, container_height: f64) -> Self {
        Self {
            item_count,
            item_height,
            container_height,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_item_height(mut self, item_height: f64) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_container_height(mut self, container_height: f64) -> Self {
        self.container_height = container_height;
        self
    }
}

/// Layout parameters for lists whose item heights vary.
///
/// `estimated_item_height` converts the index-based overscan into pixels above the viewport,
/// since true heights of items that were never laid out are unknown.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicLayout {
    pub item_count: usize,
    pub estimated_item_height: f64,
    pub container_height: f64,
    pub overscan: usize,
}

impl DynamicLayout {
    /// Creates a dynamic layout with [`DEFAULT_OVERSCAN`].
    pub fn new(item_count: usize, estimated_item_height: f64, container_height: f64) -> Self {
        Self {
            item_count,
            estimated_item_height,
            container_height,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_estimated_item_height(mut self, estimated_item_height: f64) -> Self {
        self.estimated_item_height = estimated_item_height;
        self
    }

    pub fn with_container_height(mut self, container_height: f64) -> Self {
        self.container_height = container_height;
        self
    }
}
