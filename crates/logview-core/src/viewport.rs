//! Viewport state.
//!
//! Tracks which line is topmost, how many lines fit the text area, the
//! horizontal pixel offset, and the widest line seen so far. The widest-line
//! value drives the horizontal scroll range; keeping it exact would require
//! measuring every line up front, so it is tracked incrementally as lines
//! scroll into view, with an explicit opt-in full recompute for callers that
//! want the exact range immediately after load.

use crate::buffer::LogBuffer;
use crate::line_index::LineIndex;
use crate::measure::{Metrics, effective_line_height};
use tracing::debug;

/// Scroll position and line-width tracking for the visible window.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    top_line: usize,
    horizontal_offset: i32,
    max_line_width: i32,
}

impl Viewport {
    /// A viewport at the origin with no measured lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the topmost visible line.
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Horizontal scroll offset in pixels.
    pub fn horizontal_offset(&self) -> i32 {
        self.horizontal_offset
    }

    /// Widest line width observed so far, in pixels.
    ///
    /// Monotonically non-decreasing between reloads. Converges to the true
    /// maximum once every line has been visible at least once.
    pub fn max_line_width(&self) -> i32 {
        self.max_line_width
    }

    /// Reset to the origin. Called when a new buffer is loaded.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// How many whole lines fit the text area vertically.
    pub fn lines_per_page(&self, metrics: &impl Metrics) -> usize {
        let height = metrics.text_area().h.max(0);
        (height / effective_line_height(metrics)) as usize
    }

    /// Set the topmost line, clamped to `[0, line_count - 1]`.
    pub fn set_top_line(&mut self, line: usize, index: &LineIndex) {
        self.top_line = line.min(index.last_line_index().unwrap_or(0));
    }

    /// Re-clamp the topmost line after the index or the text area changed.
    pub fn clamp_top_line(&mut self, index: &LineIndex) {
        self.set_top_line(self.top_line, index);
    }

    /// Set the horizontal scroll offset, floored at zero.
    pub fn set_horizontal_offset(&mut self, offset: i32) {
        self.horizontal_offset = offset.max(0);
    }

    /// Fold one measured line width into the running maximum.
    ///
    /// Returns `true` if the maximum grew, in which case the horizontal
    /// scroll range needs updating.
    pub fn observe_line_width(&mut self, width: f64) -> bool {
        let width = width.ceil() as i32;
        if width > self.max_line_width {
            self.max_line_width = width;
            true
        } else {
            false
        }
    }

    /// Measure every line and set the exact maximum width.
    ///
    /// O(total bytes). Avoid on very large buffers; the incremental
    /// [`observe_line_width`](Self::observe_line_width) path converges as the
    /// user scrolls, without the up-front cost.
    pub fn recompute_max_line_width(
        &mut self,
        buffer: &LogBuffer,
        index: &LineIndex,
        metrics: &impl Metrics,
    ) {
        let mut max_width = 0.0f64;
        for span in index.spans() {
            let width = metrics.text_width(buffer.slice(span.start..span.end));
            max_width = max_width.max(width);
        }
        self.max_line_width = max_width.ceil() as i32;
        debug!(
            lines = index.line_count(),
            max_line_width = self.max_line_width,
            "full line width recompute"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{MonospaceMetrics, Rect};

    fn metrics(line_height: i32, area_h: i32) -> MonospaceMetrics {
        MonospaceMetrics::new(1.0, line_height, Rect::new(0, 0, 80, area_h))
    }

    #[test]
    fn test_lines_per_page() {
        let viewport = Viewport::new();
        assert_eq!(viewport.lines_per_page(&metrics(10, 100)), 10);
        assert_eq!(viewport.lines_per_page(&metrics(10, 95)), 9);
        assert_eq!(viewport.lines_per_page(&metrics(10, 0)), 0);
    }

    #[test]
    fn test_lines_per_page_with_zero_line_height() {
        // Degenerate line height is floored to 1 instead of dividing by zero.
        let viewport = Viewport::new();
        assert_eq!(viewport.lines_per_page(&metrics(0, 50)), 50);
    }

    #[test]
    fn test_top_line_clamps_to_index() {
        let index = LineIndex::build(&LogBuffer::from("a\nb\nc"));
        let mut viewport = Viewport::new();
        viewport.set_top_line(10, &index);
        assert_eq!(viewport.top_line(), 2);

        let empty = LineIndex::new();
        viewport.clamp_top_line(&empty);
        assert_eq!(viewport.top_line(), 0);
    }

    #[test]
    fn test_observe_line_width_is_monotonic() {
        let mut viewport = Viewport::new();
        assert!(viewport.observe_line_width(10.0));
        assert_eq!(viewport.max_line_width(), 10);
        assert!(!viewport.observe_line_width(8.0));
        assert_eq!(viewport.max_line_width(), 10);
        assert!(viewport.observe_line_width(10.5));
        assert_eq!(viewport.max_line_width(), 11);
    }

    #[test]
    fn test_recompute_max_line_width_is_exact() {
        let buffer = LogBuffer::from("ab\nlongest line\ncd\n");
        let index = LineIndex::build(&buffer);
        let metrics = MonospaceMetrics::new(2.0, 10, Rect::new(0, 0, 80, 100));

        let mut viewport = Viewport::new();
        viewport.recompute_max_line_width(&buffer, &index, &metrics);
        assert_eq!(viewport.max_line_width(), 24); // "longest line" * 2px

        // The synthetic trailing empty line measures zero and never wins.
        let trailing_only = LogBuffer::from("\n");
        let trailing_index = LineIndex::build(&trailing_only);
        viewport.reset();
        viewport.recompute_max_line_width(&trailing_only, &trailing_index, &metrics);
        assert_eq!(viewport.max_line_width(), 0);
    }

    #[test]
    fn test_reset_clears_max_width() {
        let mut viewport = Viewport::new();
        viewport.observe_line_width(42.0);
        viewport.set_horizontal_offset(7);
        viewport.reset();
        assert_eq!(viewport.max_line_width(), 0);
        assert_eq!(viewport.horizontal_offset(), 0);
        assert_eq!(viewport.top_line(), 0);
    }
}
