//! Pointer-to-text coordinate mapping.
//!
//! Pointer input is always "somewhere on the screen" and only sometimes over
//! the data, so every mapping here clamps to the nearest valid line or offset
//! instead of failing. The x-to-byte walk measures whole prefixes through the
//! injected [`Metrics`] capability because width need not be linear per byte
//! in proportional fonts; that makes it O(line length) per query, which is a
//! known caveat for very long lines.

use crate::buffer::LogBuffer;
use crate::line_index::LineIndex;
use crate::measure::{Metrics, effective_line_height};
use crate::viewport::Viewport;

/// Read-only view over the engine state needed to resolve pointer positions.
pub struct HitTester<'a, M: Metrics> {
    buffer: &'a LogBuffer,
    index: &'a LineIndex,
    viewport: &'a Viewport,
    metrics: &'a M,
}

impl<'a, M: Metrics> HitTester<'a, M> {
    /// Borrow the pieces a hit test reads.
    pub fn new(
        buffer: &'a LogBuffer,
        index: &'a LineIndex,
        viewport: &'a Viewport,
        metrics: &'a M,
    ) -> Self {
        Self {
            buffer,
            index,
            viewport,
            metrics,
        }
    }

    /// Line index under pixel row `y`.
    ///
    /// Above the text area clamps to line 0, below it to the last line.
    /// `None` only when the index holds no lines at all.
    pub fn line_index_for_y(&self, y: i32) -> Option<usize> {
        let last = self.index.last_line_index()?;
        let area = self.metrics.text_area();
        if y < area.y {
            return Some(0);
        }
        if y > area.bottom() {
            return Some(last);
        }
        let row = ((y - area.y) / effective_line_height(self.metrics)) as usize;
        Some((self.viewport.top_line() + row).min(last))
    }

    /// Byte offset under pixel column `x` within line `line_index`.
    ///
    /// An out-of-range line yields the end-of-buffer sentinel; a pointer left
    /// of the text area yields the line start. Otherwise walks forward one
    /// byte at a time until the measured prefix width passes the pointer,
    /// returning the byte the pointer is over.
    pub fn byte_offset_for_x_in_line(&self, line_index: usize, x: i32) -> usize {
        let Some(span) = self.index.line(line_index) else {
            return self.buffer.len();
        };
        let area = self.metrics.text_area();
        if x < area.x {
            return span.start;
        }

        let target = f64::from(x - area.x + self.viewport.horizontal_offset());
        let mut candidate = span.start;
        while candidate <= span.end {
            let prefix = self.buffer.slice(span.start..candidate);
            if self.metrics.text_width(prefix) > target {
                return candidate - 1;
            }
            candidate += 1;
        }
        span.end
    }

    /// Byte offset under the pointer position.
    pub fn offset_for_point(&self, x: i32, y: i32) -> usize {
        match self.line_index_for_y(y) {
            Some(line) => self.byte_offset_for_x_in_line(line, x),
            None => self.buffer.len(),
        }
    }
}
