//! Line index over the raw buffer.
//!
//! The index is built once per loaded buffer with a single `memchr` scan and
//! is immutable afterwards. Every line is a byte span excluding its
//! terminating newline; a buffer that ends with `'\n'` gets a synthetic empty
//! trailing line so the viewer shows a final blank row, matching common
//! log-viewer conventions.

use crate::buffer::LogBuffer;
use memchr::memchr_iter;

/// Byte bounds of one line, excluding the terminating newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// Byte offset of the first byte of the line.
    pub start: usize,
    /// Byte offset one past the last content byte (the newline's offset, or
    /// the buffer length for the last line).
    pub end: usize,
}

impl LineSpan {
    /// Content length of the line in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a blank line.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `offset` falls on this line. The end offset is
    /// inclusive: an offset sitting on the newline still belongs to this
    /// line, not the next.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// Ordered line spans over an immutable buffer.
///
/// Consecutive spans are separated by exactly one newline byte:
/// `lines[i].end + 1 == lines[i + 1].start`.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    lines: Vec<LineSpan>,
}

impl LineIndex {
    /// An index over no data. All queries return `None`/zero.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Scan `buffer` once and build the index.
    ///
    /// Panics if the resulting line count cannot be addressed by a 32-bit
    /// line number; callers loading buffers of that size must pre-validate.
    pub fn build(buffer: &LogBuffer) -> Self {
        let data = buffer.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0usize;

        for newline in memchr_iter(b'\n', data) {
            lines.push(LineSpan {
                start,
                end: newline,
            });
            start = newline + 1;
        }

        if start < data.len() {
            lines.push(LineSpan {
                start,
                end: data.len(),
            });
        } else if !data.is_empty() {
            // Data ends with a newline: synthetic empty trailing line.
            lines.push(LineSpan {
                start: data.len(),
                end: data.len(),
            });
        }

        // Line numbers are exposed to hosts as 32-bit scrollbar values.
        assert!(
            lines.len() < i32::MAX as usize,
            "line count exceeds 32-bit line numbers"
        );

        Self { lines }
    }

    /// Number of lines in the index. Zero for an empty buffer.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the index holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The span of line `index`, or `None` out of range.
    pub fn line(&self, index: usize) -> Option<LineSpan> {
        self.lines.get(index).copied()
    }

    /// Index of the last line, or `None` for an empty index.
    pub fn last_line_index(&self) -> Option<usize> {
        self.lines.len().checked_sub(1)
    }

    /// Index of the line containing `offset`.
    ///
    /// Binary search over the sorted line starts; `offset == line.end` maps
    /// to that line, not the next. Offsets past the end of the buffer clamp
    /// to the last line. `None` only for an empty index.
    pub fn line_containing(&self, offset: usize) -> Option<usize> {
        if self.lines.is_empty() {
            return None;
        }
        let after = self.lines.partition_point(|line| line.start <= offset);
        Some(after.saturating_sub(1))
    }

    /// All spans, in order.
    pub fn spans(&self) -> &[LineSpan] {
        &self.lines
    }
}
