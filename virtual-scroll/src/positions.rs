use crate::types::sanitize_extent;

/// Prefix sums over per-item heights.
///
/// `position(i)` is the sum of the heights of all items before `i`, so positions are
/// non-decreasing and `total_height() == position(len - 1) + height(len - 1)`.
///
/// Building is `O(n)`. Keep one instance per list and rebuild it only when the item count or
/// item heights change; window queries against a built index are `O(log n)` (see
/// [`ItemPositions::window`]).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemPositions {
    positions: Vec<f64>,
    heights: Vec<f64>,
    total: f64,
}

impl ItemPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index by calling `get_item_height(i)` once for every `i < item_count`.
    ///
    /// Negative or non-finite heights are treated as `0.0`: the item keeps a zero-size slot.
    pub fn build(item_count: usize, mut get_item_height: impl FnMut(usize) -> f64) -> Self {
        let mut positions = Vec::with_capacity(item_count);
        let mut heights = Vec::with_capacity(item_count);
        let mut acc = 0.0f64;
        for index in 0..item_count {
            let height = checked_height(get_item_height(index));
            positions.push(acc);
            heights.push(height);
            acc += height;
        }
        vdebug!(item_count, total = acc, "ItemPositions::build");
        Self {
            positions,
            heights,
            total: acc,
        }
    }

    pub fn from_heights(heights: &[f64]) -> Self {
        Self::build(heights.len(), |i| heights[i])
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn total_height(&self) -> f64 {
        self.total
    }

    /// The prefix sums, one entry per item.
    pub fn as_slice(&self) -> &[f64] {
        &self.positions
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn position(&self, index: usize) -> Option<f64> {
        self.positions.get(index).copied()
    }

    pub fn height(&self, index: usize) -> Option<f64> {
        self.heights.get(index).copied()
    }

    pub fn end_of(&self, index: usize) -> Option<f64> {
        Some(self.position(index)? + self.height(index)?)
    }

    /// Replaces the height of one item and returns the applied delta.
    ///
    /// Positions after `index` shift by the delta. This is `O(n - index)`, which is what
    /// measuring a handful of freshly rendered items per frame costs.
    pub fn set_height(&mut self, index: usize, height: f64) -> f64 {
        let Some(&current) = self.heights.get(index) else {
            return 0.0;
        };
        let height = checked_height(height);
        if current == height {
            return 0.0;
        }
        self.heights[index] = height;
        self.accumulate_from(index);
        height - current
    }

    pub fn push(&mut self, height: f64) {
        let height = checked_height(height);
        self.positions.push(self.total);
        self.heights.push(height);
        self.total += height;
    }

    pub fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }
        self.total = self.positions[len];
        self.positions.truncate(len);
        self.heights.truncate(len);
    }

    /// Grows or shrinks the index to `len` items, asking `get_item_height` for new items only.
    pub fn resize_with(&mut self, len: usize, mut get_item_height: impl FnMut(usize) -> f64) {
        if len <= self.len() {
            self.truncate(len);
            return;
        }
        self.positions.reserve(len - self.len());
        self.heights.reserve(len - self.len());
        for index in self.len()..len {
            self.push(get_item_height(index));
        }
    }

    /// Returns the index of the item covering `offset`.
    ///
    /// Offsets before the first item map to 0, offsets past the end map to the last item.
    /// Zero-size items never cover an offset. Returns `None` for an empty index.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        let last = self.len().checked_sub(1)?;
        // The end of item `i` is `positions[i + 1]`; the last item ends at `total`.
        let consumed = self.positions[1..].partition_point(|&p| p <= offset);
        Some(consumed.min(last))
    }

    /// First index `>= from` whose start is past `offset`, or `len()` if there is none.
    pub(crate) fn first_starting_after(&self, from: usize, offset: f64) -> usize {
        from + self.positions[from..].partition_point(|&p| p <= offset)
    }

    fn accumulate_from(&mut self, index: usize) {
        let mut acc = self.positions[index];
        for i in index..self.positions.len() {
            self.positions[i] = acc;
            acc += self.heights[i];
        }
        self.total = acc;
    }
}

fn checked_height(height: f64) -> f64 {
    let sanitized = sanitize_extent(height);
    if sanitized != height {
        vwarn!(height, "invalid item height clamped to 0");
    }
    sanitized
}
