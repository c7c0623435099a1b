//! Layout engine for the day strip.
//!
//! This module handles:
//! - Uniform day-cell geometry (index to pixel offset and back)
//! - Viewport state (scroll position, materializable window, overscan)
//! - Centering math for programmatic "jump to date"

mod strip;
mod viewport;

pub use strip::{StripLayout, VirtualItem, DEFAULT_DAY_WIDTH};
pub use viewport::{Viewport, DEFAULT_OVERSCAN};
