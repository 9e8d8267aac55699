//! Selection and cursor tracking.
//!
//! A selection is a pair of byte offsets kept in gesture order: dragging
//! right-to-left leaves `begin > end`. Consumers that need a canonical range
//! (copy, highlight painting) go through [`Selection::normalized`]. The
//! logical cursor is a single byte offset that follows the most recent
//! interaction endpoint; it is never painted by the engine but feeds the
//! status-bar notification.

use crate::buffer::LogBuffer;
use crate::line_index::LineSpan;

/// Bytes that end a word for double-click selection.
///
/// Fixed, language-agnostic set: whitespace plus common punctuation,
/// brackets, and quotes.
pub const WORD_SEPARATORS: &[u8] = b" \n\t,.;:!?-()[]{}'\"/\\|<>+=*~`@#$%^&";

/// Returns `true` if `byte` separates words.
pub fn is_word_separator(byte: u8) -> bool {
    WORD_SEPARATORS.contains(&byte)
}

/// Selection endpoints in gesture order; `begin` may exceed `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Anchor offset, set on pointer-down.
    pub begin: usize,
    /// Focus offset, moved by drags and extensions.
    pub end: usize,
}

impl Selection {
    /// A collapsed selection at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self {
            begin: offset,
            end: offset,
        }
    }

    /// Endpoints ordered ascending, independent of gesture direction.
    pub fn normalized(&self) -> (usize, usize) {
        if self.begin <= self.end {
            (self.begin, self.end)
        } else {
            (self.end, self.begin)
        }
    }

    /// Returns `true` if the selection covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// Lifecycle of the selection between buffer loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No interaction since the buffer was loaded.
    #[default]
    Empty,
    /// A collapsed selection (single point).
    Caret,
    /// A non-empty range.
    Range,
}

/// Owns the selection, the logical cursor, and the operations on them.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selection: Selection,
    cursor: usize,
    state: SelectionState,
}

impl SelectionModel {
    /// A model with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything. Called when a new buffer is loaded.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current selection, in gesture order.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Current cursor offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn set(&mut self, selection: Selection, cursor: usize) {
        self.selection = selection;
        self.cursor = cursor;
        self.state = if selection.is_empty() {
            SelectionState::Caret
        } else {
            SelectionState::Range
        };
    }

    /// Collapse the selection to a caret at `offset`.
    pub fn set_selection_start(&mut self, offset: usize) {
        self.set(Selection::caret(offset), offset);
    }

    /// Move the selection focus to `offset`, keeping the anchor.
    ///
    /// Idempotent: extending twice to the same offset changes nothing.
    pub fn extend_selection_to(&mut self, offset: usize) {
        let anchor = self.selection.begin;
        self.set(
            Selection {
                begin: anchor,
                end: offset,
            },
            offset,
        );
    }

    /// Select the maximal run of non-separator bytes around `offset`.
    ///
    /// Expands backward while the preceding byte is not a separator, then
    /// forward under the same rule. On a separator byte the result is a
    /// caret at `offset`.
    pub fn select_word(&mut self, buffer: &LogBuffer, offset: usize) {
        let data = buffer.as_bytes();
        let offset = offset.min(data.len());
        let mut begin = offset;
        let mut end = offset;
        while begin > 0 && !is_word_separator(data[begin - 1]) {
            begin -= 1;
        }
        while end < data.len() && !is_word_separator(data[end]) {
            end += 1;
        }
        self.set(Selection { begin, end }, end);
    }

    /// Select a full line including its trailing newline.
    ///
    /// The end offset is `span.end + 1` clamped to the buffer length, so the
    /// last line (or the synthetic trailing line) selects without the
    /// nonexistent newline.
    pub fn select_line_span(&mut self, span: LineSpan, buffer_len: usize) {
        let end = (span.end + 1).min(buffer_len);
        self.set(
            Selection {
                begin: span.start,
                end,
            },
            end,
        );
    }

    /// Select the whole buffer.
    pub fn select_all(&mut self, buffer_len: usize) {
        self.set(
            Selection {
                begin: 0,
                end: buffer_len,
            },
            buffer_len,
        );
    }

    /// Set explicit endpoints in gesture order; the cursor follows `end`.
    pub fn set_range(&mut self, begin: usize, end: usize) {
        self.set(Selection { begin, end }, end);
    }

    /// Zero-copy view of the selected bytes.
    pub fn selected_text<'a>(&self, buffer: &'a LogBuffer) -> &'a [u8] {
        let (begin, end) = self.selection.normalized();
        buffer.slice(begin..end)
    }

    /// Portion of the selection overlapping one line's bounds, if any.
    ///
    /// Used for highlight painting: the returned offsets are clamped to
    /// `[span.start, span.end]`, and an empty overlap (caret, or selection
    /// touching only the line edge) is `None`.
    pub fn selection_range_for_line(&self, span: LineSpan) -> Option<(usize, usize)> {
        let (min, max) = self.selection.normalized();
        if max < span.start || min > span.end {
            return None;
        }
        let begin = min.max(span.start);
        let end = max.min(span.end);
        (begin < end).then_some((begin, end))
    }
}
