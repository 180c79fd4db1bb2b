use core::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// The slice of a list that must be rendered for one scroll offset.
///
/// Indexes are inclusive. An empty window (empty list) has `end_index == None` and
/// `visible_count == 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start_index: usize,
    pub end_index: Option<usize>, // inclusive
    /// Vertical translation of the rendered block inside the full-height container.
    pub offset_y: f64,
    pub visible_count: usize,
    /// Height of the whole scrollable content.
    pub total_height: f64,
}

impl Window {
    pub fn empty() -> Self {
        Self {
            start_index: 0,
            end_index: None,
            offset_y: 0.0,
            visible_count: 0,
            total_height: 0.0,
        }
    }

    pub(crate) fn new(
        start_index: usize,
        end_index: usize,
        offset_y: f64,
        total_height: f64,
    ) -> Self {
        debug_assert!(start_index <= end_index);
        Self {
            start_index,
            end_index: Some(end_index),
            offset_y,
            visible_count: end_index - start_index + 1,
            total_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end_index.is_none()
    }

    /// Half-open index range, convenient for `for i in window.range()`.
    pub fn range(&self) -> Range<usize> {
        match self.end_index {
            Some(end) => self.start_index..end + 1,
            None => 0..0,
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::empty()
    }
}

/// Heights and container sizes: negative, `NaN` and infinite values become `0.0`.
pub(crate) fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Scroll offsets may be negative (overscroll); only `NaN` is rejected.
pub(crate) fn sanitize_offset(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

pub(crate) fn overscan_as_isize(overscan: usize) -> isize {
    isize::try_from(overscan).unwrap_or(isize::MAX)
}
