//! Adapter utilities for the `virtual-scroll` crate.
//!
//! The `virtual-scroll` crate is stateless windowing math. This crate provides the small,
//! framework-neutral pieces a UI layer needs around it:
//!
//! - [`ScrollController`]: owns the scroll offset and the cached position index, recomputes
//!   the window on every scroll/resize event and notifies a subscriber
//! - [`Throttle`] / [`Debounce`]: rate limiting for high-frequency scroll events, driven by an
//!   adapter-supplied clock (`now_ms`)
//! - [`render_window`]: maps a window onto concrete items, keys and positioning styles
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod debounce;
mod options;
mod render;
mod throttle;

#[cfg(test)]
mod tests;

pub use controller::ScrollController;
pub use debounce::Debounce;
pub use options::{ControllerOptions, HeightFn, KeyFn, Layout, OnWindowChange};
pub use render::{Placement, RenderedItem, render_window, render_window_into};
pub use throttle::Throttle;
