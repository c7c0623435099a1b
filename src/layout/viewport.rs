//! Viewport state management for the day strip.
//!
//! The viewport is the virtualization window: given a scroll offset and a
//! container width it yields only the cell indices that must currently be
//! materialized, plus a fixed overscan margin on each side. Every operation
//! here is O(materialized items), never O(total days).

use super::strip::{StripLayout, VirtualItem};

/// Extra cells materialized on each side of the visible span to reduce
/// popping during scroll.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Viewport state - the visible window onto the strip.
#[derive(Clone)]
pub struct Viewport {
    /// Horizontal scroll position in strip coordinates.
    pub scroll_x: f32,
    /// Container width in pixels.
    pub width: f32,
    /// Cells materialized beyond each visible edge.
    pub overscan: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a new viewport with default values.
    pub fn new() -> Self {
        Self {
            scroll_x: 0.0,
            width: 800.0,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    /// Inclusive range of cell indices to materialize at the current scroll
    /// position, or `None` for an empty strip.
    pub fn visible_days(&self, strip: &StripLayout) -> Option<(usize, usize)> {
        let last = strip.last_index()?;
        let start = strip.index_at_x(self.scroll_x.max(0.0)).unwrap_or(last);
        let end = strip
            .index_at_x(self.scroll_x.max(0.0) + self.width.max(0.0))
            .unwrap_or(last);
        let start = start.saturating_sub(self.overscan);
        let end = (end + self.overscan).min(last);
        Some((start.min(last), end))
    }

    /// The materializable cell sequence for the current window.
    pub fn items(&self, strip: &StripLayout) -> Vec<VirtualItem> {
        let Some((start, end)) = self.visible_days(strip) else {
            return Vec::new();
        };
        (start..=end).filter_map(|i| strip.item(i)).collect()
    }

    /// Maximum valid scroll offset (0 when the strip fits the container).
    pub fn max_scroll(&self, strip: &StripLayout) -> f32 {
        (strip.total_width() - self.width).max(0.0)
    }

    /// Clamp scroll position to the valid range.
    pub fn clamp_scroll(&mut self, strip: &StripLayout) {
        self.scroll_x = self.scroll_x.clamp(0.0, self.max_scroll(strip));
    }

    /// Scroll by a delta amount.
    pub fn scroll_by(&mut self, delta_x: f32, strip: &StripLayout) {
        if delta_x.is_finite() {
            self.scroll_x += delta_x;
        }
        self.clamp_scroll(strip);
    }

    /// Set absolute scroll position.
    pub fn set_scroll(&mut self, x: f32, strip: &StripLayout) {
        if x.is_finite() {
            self.scroll_x = x;
        }
        self.clamp_scroll(strip);
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: f32) {
        if width.is_finite() {
            self.width = width.max(0.0);
        }
    }

    /// Scroll offset that centers the cell at `index`, clamped so it never
    /// goes negative or past the end of the strip.
    ///
    /// `None` when the index is out of range or the math degenerates to a
    /// non-finite value.
    pub fn centered_scroll_for(&self, strip: &StripLayout, index: usize) -> Option<f32> {
        let item = strip.item(index)?;
        let target = item.start - (self.width - item.size) / 2.0;
        if !target.is_finite() {
            return None;
        }
        Some(target.clamp(0.0, self.max_scroll(strip)))
    }

    /// Among the currently materialized cells, the one whose center is
    /// closest to the viewport's horizontal midpoint.
    pub fn nearest_to_center(&self, strip: &StripLayout) -> Option<usize> {
        let (start, end) = self.visible_days(strip)?;
        let midpoint = self.scroll_x + self.width / 2.0;
        let mut best: Option<(usize, f32)> = None;
        for index in start..=end {
            let Some(item) = strip.item(index) else {
                continue;
            };
            let center = item.start + item.size / 2.0;
            let distance = (center - midpoint).abs();
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((index, distance)),
            }
        }
        best.map(|(index, _)| index)
    }
}
