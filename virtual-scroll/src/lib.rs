//! Headless list windowing for virtual scrolling.
//!
//! For the stateful scroll controller, throttle/debounce helpers and render helpers, see the
//! `virtual-scroll-adapter` crate.
//!
//! This crate answers one question per scroll or resize event: which item indexes must be
//! rendered, where the rendered block sits, and how tall the whole scrollable content is.
//! Rendering cost stays proportional to the window, not to the list length.
//!
//! Two layouts are supported:
//! - fixed item height ([`compute_window`]), pure `O(1)` arithmetic
//! - dynamic/estimated item heights ([`ItemPositions`] + [`compute_dynamic_window`]), where
//!   the `O(n)` prefix-sum index is built once and each window query is `O(log n)`
//!
//! It is UI-agnostic. A TUI/GUI/DOM layer is expected to provide:
//! - the scroll offset and container height (pixels or rows, any consistent unit)
//! - the item count and either a constant item height or per-index heights
//! - the actual painting of items in `window.range()`
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod cache;
mod dynamic;
mod fixed;
mod key;
mod options;
mod positions;
mod state;
mod style;
mod types;


pub use cache::{CacheKey, MeasurementCache};
pub use dynamic::{DynamicWindow, compute_dynamic_window};
pub use fixed::compute_window;
pub use key::{Identified, ItemKey, default_item_key};
pub use options::{DEFAULT_OVERSCAN, DynamicLayout, FixedLayout};
pub use positions::ItemPositions;
pub use state::{FrameState, ScrollPhase, ScrollState};
pub use style::{
    ContainerStyle, ItemStyle, container_style, dynamic_item_style, fixed_item_style,
};
pub use types::{Align, Window};
