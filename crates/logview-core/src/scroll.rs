//! Scrollbar reconciliation.
//!
//! Host toolkits model a scrollbar as a 1-based current value plus a page
//! size and an inclusive range. [`ScrollSync`] mirrors both bars and keeps
//! them consistent with the viewport: ranges are recomputed on resize and
//! buffer changes, and a value change coming back from the host is clamped
//! and applied to the viewport. Applying a value never measures text and
//! never touches the selection.

use crate::line_index::LineIndex;
use crate::measure::Metrics;
use crate::viewport::Viewport;

/// Which scrollbar an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    /// The line scrollbar.
    Vertical,
    /// The pixel-offset scrollbar.
    Horizontal,
}

/// Mirror of one host scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarModel {
    /// Current value, 1-based.
    pub value: i32,
    /// Size of one page in the bar's units.
    pub page_size: i32,
    /// Smallest value.
    pub min: i32,
    /// Largest value.
    pub max: i32,
}

impl Default for ScrollbarModel {
    fn default() -> Self {
        Self {
            value: 1,
            page_size: 1,
            min: 1,
            max: 1,
        }
    }
}

/// Both scrollbar mirrors.
#[derive(Debug, Clone, Default)]
pub struct ScrollSync {
    vertical: ScrollbarModel,
    horizontal: ScrollbarModel,
}

impl ScrollSync {
    /// Idle scrollbars (value 1, range `[1, 1]`).
    pub fn new() -> Self {
        Self::default()
    }

    /// The vertical bar: value `top_line + 1`, page `lines_per_page`,
    /// range `[1, line_count]`.
    pub fn vertical(&self) -> ScrollbarModel {
        self.vertical
    }

    /// The horizontal bar: value `horizontal_offset + 1`, page = text area
    /// width, range `[1, max_line_width]`.
    pub fn horizontal(&self) -> ScrollbarModel {
        self.horizontal
    }

    /// Recompute both ranges from the current index and viewport.
    pub fn sync(&mut self, index: &LineIndex, viewport: &Viewport, metrics: &impl Metrics) {
        self.vertical = ScrollbarModel {
            value: viewport.top_line() as i32 + 1,
            page_size: (viewport.lines_per_page(metrics) as i32).max(1),
            min: 1,
            max: (index.line_count() as i32).max(1),
        };
        self.horizontal = ScrollbarModel {
            value: viewport.horizontal_offset() + 1,
            page_size: metrics.text_area().w.max(1),
            min: 1,
            max: viewport.max_line_width().max(1),
        };
    }

    /// Widen the horizontal range after an incremental line-width update.
    pub fn set_horizontal_max(&mut self, max_line_width: i32) {
        self.horizontal.max = max_line_width.max(1);
    }

    /// Apply a value change from the host bar onto the viewport.
    ///
    /// The value is clamped to the bar's range. Returns `true` if the
    /// viewport actually moved.
    pub fn apply(
        &mut self,
        axis: ScrollAxis,
        value: i32,
        index: &LineIndex,
        viewport: &mut Viewport,
    ) -> bool {
        match axis {
            ScrollAxis::Vertical => {
                let clamped = value.clamp(self.vertical.min, self.vertical.max);
                let new_top = (clamped - 1) as usize;
                let moved = new_top != viewport.top_line();
                viewport.set_top_line(new_top, index);
                self.vertical.value = viewport.top_line() as i32 + 1;
                moved
            }
            ScrollAxis::Horizontal => {
                let clamped = value.clamp(self.horizontal.min, self.horizontal.max);
                let new_offset = clamped - 1;
                let moved = new_offset != viewport.horizontal_offset();
                viewport.set_horizontal_offset(new_offset);
                self.horizontal.value = viewport.horizontal_offset() + 1;
                moved
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::LogBuffer;
    use crate::measure::{MonospaceMetrics, Rect};

    fn fixture() -> (LineIndex, Viewport, MonospaceMetrics) {
        let buffer = LogBuffer::from("a\nbb\nccc\ndddd\neeeee");
        let index = LineIndex::build(&buffer);
        let viewport = Viewport::new();
        let metrics = MonospaceMetrics::new(1.0, 10, Rect::new(0, 0, 80, 30));
        (index, viewport, metrics)
    }

    #[test]
    fn test_sync_ranges() {
        let (index, mut viewport, metrics) = fixture();
        viewport.set_top_line(2, &index);
        viewport.observe_line_width(120.0);
        viewport.set_horizontal_offset(15);

        let mut sync = ScrollSync::new();
        sync.sync(&index, &viewport, &metrics);

        let vertical = sync.vertical();
        assert_eq!(vertical.value, 3);
        assert_eq!(vertical.page_size, 3);
        assert_eq!(vertical.min, 1);
        assert_eq!(vertical.max, 5);

        let horizontal = sync.horizontal();
        assert_eq!(horizontal.value, 16);
        assert_eq!(horizontal.page_size, 80);
        assert_eq!(horizontal.max, 120);
    }

    #[test]
    fn test_sync_on_empty_index() {
        let index = LineIndex::new();
        let viewport = Viewport::new();
        let metrics = MonospaceMetrics::new(1.0, 10, Rect::new(0, 0, 80, 30));
        let mut sync = ScrollSync::new();
        sync.sync(&index, &viewport, &metrics);
        assert_eq!(sync.vertical(), ScrollbarModel::default());
        assert_eq!(
            sync.horizontal(),
            ScrollbarModel {
                value: 1,
                page_size: 80,
                min: 1,
                max: 1
            }
        );
    }

    #[test]
    fn test_apply_vertical_moves_top_line() {
        let (index, mut viewport, metrics) = fixture();
        let mut sync = ScrollSync::new();
        sync.sync(&index, &viewport, &metrics);

        assert!(sync.apply(ScrollAxis::Vertical, 4, &index, &mut viewport));
        assert_eq!(viewport.top_line(), 3);
        assert_eq!(sync.vertical().value, 4);

        // Same value again: no movement.
        assert!(!sync.apply(ScrollAxis::Vertical, 4, &index, &mut viewport));
    }

    #[test]
    fn test_apply_clamps_to_range() {
        let (index, mut viewport, metrics) = fixture();
        let mut sync = ScrollSync::new();
        sync.sync(&index, &viewport, &metrics);

        sync.apply(ScrollAxis::Vertical, 99, &index, &mut viewport);
        assert_eq!(viewport.top_line(), 4);
        sync.apply(ScrollAxis::Vertical, -5, &index, &mut viewport);
        assert_eq!(viewport.top_line(), 0);
    }

    #[test]
    fn test_apply_horizontal_moves_offset() {
        let (index, mut viewport, metrics) = fixture();
        viewport.observe_line_width(200.0);
        let mut sync = ScrollSync::new();
        sync.sync(&index, &viewport, &metrics);

        assert!(sync.apply(ScrollAxis::Horizontal, 41, &index, &mut viewport));
        assert_eq!(viewport.horizontal_offset(), 40);
        assert_eq!(sync.horizontal().value, 41);
    }

    #[test]
    fn test_incremental_width_widens_range() {
        let (index, mut viewport, metrics) = fixture();
        let mut sync = ScrollSync::new();
        sync.sync(&index, &viewport, &metrics);
        assert_eq!(sync.horizontal().max, 1);

        viewport.observe_line_width(300.0);
        sync.set_horizontal_max(viewport.max_line_width());
        assert_eq!(sync.horizontal().max, 300);
    }
}
