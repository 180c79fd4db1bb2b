//! Positioning descriptors for the rendered window.
//!
//! Items are absolutely positioned inside a relatively positioned container whose height is
//! the total content height, so native scrollbars reflect the full list.

use core::fmt;

use crate::ItemPositions;
use crate::types::sanitize_extent;

/// Absolute placement of one rendered item (full width).
///
/// `height` is `None` in the dynamic path: the estimate is not pinned, so the item can take
/// its natural height and be measured.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStyle {
    pub top: f64,
    pub height: Option<f64>,
}

impl fmt::Display for ItemStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position: absolute; top: {}px; width: 100%;", self.top)?;
        if let Some(height) = self.height {
            write!(f, " height: {height}px;")?;
        }
        Ok(())
    }
}

/// Sizing of the scroll container.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerStyle {
    pub height: f64,
}

impl fmt::Display for ContainerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position: relative; height: {}px; overflow-y: auto;",
            self.height
        )
    }
}

/// Style for item `index` in a fixed-height list: `top = index * item_height`.
pub fn fixed_item_style(index: usize, item_height: f64) -> ItemStyle {
    let item_height = sanitize_extent(item_height);
    ItemStyle {
        top: index as f64 * item_height,
        height: Some(item_height),
    }
}

/// Style for item `index` in a dynamic-height list, or `None` if `index` is not indexed.
pub fn dynamic_item_style(index: usize, positions: &ItemPositions) -> Option<ItemStyle> {
    Some(ItemStyle {
        top: positions.position(index)?,
        height: None,
    })
}

pub fn container_style(total_height: f64) -> ContainerStyle {
    ContainerStyle {
        height: sanitize_extent(total_height),
    }
}
