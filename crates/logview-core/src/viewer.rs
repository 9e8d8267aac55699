//! Viewer facade.
//!
//! [`LogViewer`] wires the engine components together behind the interface an
//! embedding layer talks to: load a buffer, forward pointer/keyboard/scroll
//! events, pull the visible lines each paint, and subscribe to change
//! notifications. The viewer owns the line index, viewport, selection, click
//! tracker, and scrollbar mirrors; the buffer handle is shared with the
//! embedder and the measurement capability is injected.
//!
//! Pointer-derived paths clamp out-of-range input and never fail. The
//! explicit-range setters ([`LogViewer::select_range`],
//! [`LogViewer::select_line_at`]) validate and return [`ViewError`].
//! Querying a viewer before the first [`LogViewer::load_buffer`] is a
//! programming error and panics.

use std::time::Instant;

use crate::buffer::LogBuffer;
use crate::click::{ClickKind, ClickTracker};
use crate::hit::HitTester;
use crate::line_index::{LineIndex, LineSpan};
use crate::measure::Metrics;
use crate::scroll::{ScrollAxis, ScrollSync, ScrollbarModel};
use crate::search::{self, SearchError, SearchMatch, SearchOptions};
use crate::selection::{Selection, SelectionModel, SelectionState};
use crate::viewport::Viewport;
use tracing::debug;

/// Pointer modifier keys relevant to selection gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerModifiers {
    /// Shift extends the selection instead of collapsing it.
    pub shift: bool,
}

/// Keyboard shortcuts the engine understands.
///
/// Key decoding is the embedder's job; the engine only sees the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerShortcut {
    /// Copy the selection (the selected bytes are returned to the caller;
    /// clipboard plumbing stays outside the engine).
    Copy,
    /// Select the whole buffer.
    SelectAll,
}

/// Notifications emitted to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// The visible region or the selection changed; repaint.
    ViewportChanged,
    /// The logical cursor moved. `column` is the byte offset within the
    /// line, for status-bar display.
    CursorMoved {
        /// Line the cursor is on.
        line: usize,
        /// Byte offset of the cursor within that line.
        column: usize,
    },
}

/// Subscriber callback type.
///
/// The engine runs on the thread that owns the viewport, so callbacks need
/// not be `Send`.
pub type ViewerEventCallback = Box<dyn FnMut(&ViewerEvent)>;

/// One line of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleLine {
    /// Index of the line.
    pub index: usize,
    /// Byte bounds of the line's content.
    pub span: LineSpan,
}

/// Errors for explicit-range operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    /// An offset lies outside `[0, buffer length]`.
    InvalidRange {
        /// Requested begin offset.
        begin: usize,
        /// Requested end offset.
        end: usize,
    },
    /// A line index lies outside `[0, line count)`.
    IndexOutOfBounds {
        /// Requested line index.
        index: usize,
        /// Number of lines in the index.
        line_count: usize,
    },
    /// The text area or line height has no extent.
    DegenerateLayout,
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::InvalidRange { begin, end } => {
                write!(f, "Invalid range: {}..{}", begin, end)
            }
            ViewError::IndexOutOfBounds { index, line_count } => {
                write!(f, "Line index out of bounds: {} of {}", index, line_count)
            }
            ViewError::DegenerateLayout => {
                write!(f, "Degenerate layout: text area or line height has no extent")
            }
        }
    }
}

impl std::error::Error for ViewError {}

/// The viewport engine.
pub struct LogViewer<M: Metrics> {
    buffer: LogBuffer,
    index: LineIndex,
    viewport: Viewport,
    selection: SelectionModel,
    clicks: ClickTracker,
    scrollbars: ScrollSync,
    metrics: M,
    callbacks: Vec<ViewerEventCallback>,
    loaded: bool,
}

impl<M: Metrics> LogViewer<M> {
    /// Create a viewer with no buffer loaded.
    pub fn new(metrics: M) -> Self {
        Self {
            buffer: LogBuffer::empty(),
            index: LineIndex::new(),
            viewport: Viewport::new(),
            selection: SelectionModel::new(),
            clicks: ClickTracker::new(),
            scrollbars: ScrollSync::new(),
            metrics,
            callbacks: Vec::new(),
            loaded: false,
        }
    }

    fn assert_loaded(&self) {
        assert!(
            self.loaded,
            "load_buffer must be called before using the viewer"
        );
    }

    /// The injected measurement capability.
    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Mutable access to the measurement capability.
    ///
    /// Call [`on_resize`](Self::on_resize) after changing the text area.
    pub fn metrics_mut(&mut self) -> &mut M {
        &mut self.metrics
    }

    /// The loaded buffer.
    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    /// The line index over the loaded buffer.
    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }

    /// The viewport state.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The current selection, in gesture order.
    pub fn selection(&self) -> Selection {
        self.selection.selection()
    }

    /// The selection lifecycle state.
    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    /// The logical cursor offset.
    pub fn cursor(&self) -> usize {
        self.selection.cursor()
    }

    /// The cursor as `(line, column)`, column in bytes within the line.
    /// `None` while the buffer is empty.
    pub fn cursor_position(&self) -> Option<(usize, usize)> {
        let cursor = self.selection.cursor();
        let line = self.index.line_containing(cursor)?;
        let span = self.index.line(line)?;
        Some((line, cursor.saturating_sub(span.start)))
    }

    /// The vertical scrollbar mirror.
    pub fn vertical_scrollbar(&self) -> ScrollbarModel {
        self.scrollbars.vertical()
    }

    /// The horizontal scrollbar mirror.
    pub fn horizontal_scrollbar(&self) -> ScrollbarModel {
        self.scrollbars.horizontal()
    }

    /// Register a notification callback.
    pub fn subscribe(&mut self, callback: impl FnMut(&ViewerEvent) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    fn emit(&mut self, event: ViewerEvent) {
        for callback in &mut self.callbacks {
            callback(&event);
        }
    }

    fn notify_cursor(&mut self) {
        if let Some((line, column)) = self.cursor_position() {
            self.emit(ViewerEvent::CursorMoved { line, column });
        }
    }

    fn sync_scrollbars(&mut self) {
        self.scrollbars
            .sync(&self.index, &self.viewport, &self.metrics);
    }

    fn hit(&self) -> HitTester<'_, M> {
        HitTester::new(&self.buffer, &self.index, &self.viewport, &self.metrics)
    }

    /// Load a new buffer: rebuild the line index, reset the viewport,
    /// selection, and click history, and return the new line count.
    pub fn load_buffer(&mut self, buffer: LogBuffer) -> usize {
        self.index = LineIndex::build(&buffer);
        self.buffer = buffer;
        self.viewport.reset();
        self.selection.reset();
        self.clicks.reset();
        self.loaded = true;
        self.sync_scrollbars();
        debug!(
            bytes = self.buffer.len(),
            lines = self.index.line_count(),
            "buffer loaded"
        );
        self.emit(ViewerEvent::ViewportChanged);
        self.index.line_count()
    }

    /// Measure every line and set the exact horizontal scroll range.
    ///
    /// O(total bytes); opt-in after load. The default incremental tracking
    /// converges as lines scroll into view without this cost.
    pub fn recompute_max_line_width(&mut self) {
        self.assert_loaded();
        self.viewport
            .recompute_max_line_width(&self.buffer, &self.index, &self.metrics);
        self.sync_scrollbars();
        self.emit(ViewerEvent::ViewportChanged);
    }

    /// How many whole lines fit the text area vertically.
    pub fn lines_per_page(&self) -> usize {
        self.viewport.lines_per_page(&self.metrics)
    }

    /// Returns an error if the current layout cannot be painted (empty text
    /// area or non-positive line height).
    pub fn ensure_paintable(&self) -> Result<(), ViewError> {
        let area = self.metrics.text_area();
        if area.w <= 0 || area.h <= 0 || self.metrics.line_height_px() <= 0 {
            return Err(ViewError::DegenerateLayout);
        }
        Ok(())
    }

    /// The lines currently in view: at most `lines_per_page() + 1` of them,
    /// starting at the viewport's top line.
    ///
    /// The iterator is lazy and restartable; the renderer pulls it each
    /// paint. Pulling a line also measures it and folds the width into the
    /// running maximum, which is what keeps the horizontal scroll range
    /// converging as the user scrolls.
    pub fn visible_lines(&mut self) -> VisibleLines<'_, M> {
        self.assert_loaded();
        let top = self.viewport.top_line();
        let count = self.viewport.lines_per_page(&self.metrics) + 1;
        VisibleLines {
            buffer: &self.buffer,
            index: &self.index,
            metrics: &self.metrics,
            viewport: &mut self.viewport,
            scrollbars: &mut self.scrollbars,
            next_line: top,
            remaining: count.min(self.index.line_count().saturating_sub(top)),
        }
    }

    /// Portion of the selection overlapping one visible line, if any, for
    /// highlight painting.
    pub fn selection_range_for_line(&self, span: LineSpan) -> Option<(usize, usize)> {
        self.selection.selection_range_for_line(span)
    }

    /// Zero-copy view of the selected bytes.
    pub fn selected_text(&self) -> &[u8] {
        self.selection.selected_text(&self.buffer)
    }

    /// Handle a pointer press, stamping it with the current time.
    pub fn on_pointer_down(
        &mut self,
        x: i32,
        y: i32,
        modifiers: PointerModifiers,
        click_count: u8,
    ) {
        self.on_pointer_down_at(Instant::now(), x, y, modifiers, click_count);
    }

    /// Handle a pointer press with an explicit timestamp.
    ///
    /// The timestamp parameter exists for deterministic multi-click tests;
    /// embedders normally use [`on_pointer_down`](Self::on_pointer_down).
    pub fn on_pointer_down_at(
        &mut self,
        now: Instant,
        x: i32,
        y: i32,
        modifiers: PointerModifiers,
        click_count: u8,
    ) {
        self.assert_loaded();
        if self.index.is_empty() {
            return;
        }

        let offset = self.hit().offset_for_point(x, y);

        if modifiers.shift {
            self.selection.extend_selection_to(offset);
            self.emit(ViewerEvent::ViewportChanged);
            self.notify_cursor();
            return;
        }

        match self.clicks.classify(now, x, y, click_count) {
            ClickKind::Single => self.selection.set_selection_start(offset),
            ClickKind::Double => self.selection.select_word(&self.buffer, offset),
            ClickKind::Triple => {
                let line = self.hit().line_index_for_y(y);
                if let Some(span) = line.and_then(|line| self.index.line(line)) {
                    self.selection.select_line_span(span, self.buffer.len());
                }
            }
        }

        self.emit(ViewerEvent::ViewportChanged);
        self.notify_cursor();
    }

    /// Handle a pointer drag: extend the selection to the pointer.
    pub fn on_pointer_drag(&mut self, x: i32, y: i32) {
        self.assert_loaded();
        if self.index.is_empty() {
            return;
        }
        let offset = self.hit().offset_for_point(x, y);
        self.selection.extend_selection_to(offset);
        self.emit(ViewerEvent::ViewportChanged);
        self.notify_cursor();
    }

    /// Handle a pointer move without buttons.
    ///
    /// Returns `true` if the pointer is over the text area, so the embedder
    /// can switch to a text cursor shape.
    pub fn on_pointer_move(&self, x: i32, y: i32) -> bool {
        self.metrics.text_area().contains(x, y)
    }

    /// Handle a keyboard shortcut.
    ///
    /// `Copy` returns the selected bytes (or `None` for an empty selection);
    /// putting them on a clipboard is the embedder's job.
    pub fn on_keyboard_shortcut(&mut self, shortcut: ViewerShortcut) -> Option<&[u8]> {
        self.assert_loaded();
        match shortcut {
            ViewerShortcut::Copy => {
                let (begin, end) = self.selection.selection().normalized();
                if begin == end {
                    return None;
                }
                Some(self.buffer.slice(begin..end))
            }
            ViewerShortcut::SelectAll => {
                self.selection.select_all(self.buffer.len());
                self.emit(ViewerEvent::ViewportChanged);
                self.notify_cursor();
                None
            }
        }
    }

    /// Recompute derived layout after the metrics' text area changed.
    pub fn on_resize(&mut self) {
        self.assert_loaded();
        self.viewport.clamp_top_line(&self.index);
        self.sync_scrollbars();
        self.emit(ViewerEvent::ViewportChanged);
    }

    /// Apply a scrollbar value change from the host.
    pub fn on_scroll(&mut self, axis: ScrollAxis, value: i32) {
        self.assert_loaded();
        let moved = self
            .scrollbars
            .apply(axis, value, &self.index, &mut self.viewport);
        if moved {
            self.emit(ViewerEvent::ViewportChanged);
        }
    }

    /// Select an explicit byte range (gesture order allowed).
    pub fn select_range(&mut self, begin: usize, end: usize) -> Result<(), ViewError> {
        self.assert_loaded();
        let len = self.buffer.len();
        if begin > len || end > len {
            return Err(ViewError::InvalidRange { begin, end });
        }
        self.selection.set_range(begin, end);
        self.emit(ViewerEvent::ViewportChanged);
        self.notify_cursor();
        Ok(())
    }

    /// Select a full line by index, including its trailing newline.
    pub fn select_line_at(&mut self, line_index: usize) -> Result<(), ViewError> {
        self.assert_loaded();
        let span = self
            .index
            .line(line_index)
            .ok_or(ViewError::IndexOutOfBounds {
                index: line_index,
                line_count: self.index.line_count(),
            })?;
        self.selection.select_line_span(span, self.buffer.len());
        self.emit(ViewerEvent::ViewportChanged);
        self.notify_cursor();
        Ok(())
    }

    fn scroll_line_into_view(&mut self, line: usize) {
        let page = self.lines_per_page().max(1);
        let top = self.viewport.top_line();
        if line < top {
            self.viewport.set_top_line(line, &self.index);
        } else if line >= top + page {
            self.viewport
                .set_top_line(line + 1 - page, &self.index);
        }
        self.sync_scrollbars();
    }

    fn select_match(&mut self, m: SearchMatch) {
        self.selection.set_range(m.start, m.end);
        if let Some(line) = self.index.line_containing(m.start) {
            self.scroll_line_into_view(line);
        }
        self.emit(ViewerEvent::ViewportChanged);
        self.notify_cursor();
    }

    /// Find the next occurrence of `query` after the cursor, select it, and
    /// scroll it into view.
    pub fn find_next(
        &mut self,
        query: &str,
        options: SearchOptions,
    ) -> Result<Option<SearchMatch>, SearchError> {
        self.assert_loaded();
        let from = self.selection.cursor();
        let found = search::find_next(self.buffer.as_bytes(), query, options, from)?;
        if let Some(m) = found {
            self.select_match(m);
        }
        Ok(found)
    }

    /// Find the previous occurrence of `query` before the selection, select
    /// it, and scroll it into view.
    pub fn find_prev(
        &mut self,
        query: &str,
        options: SearchOptions,
    ) -> Result<Option<SearchMatch>, SearchError> {
        self.assert_loaded();
        let before = match self.selection.state() {
            SelectionState::Empty => self.buffer.len(),
            _ => self.selection.selection().normalized().0,
        };
        let found = search::find_prev(self.buffer.as_bytes(), query, options, before)?;
        if let Some(m) = found {
            self.select_match(m);
        }
        Ok(found)
    }
}

/// Lazy sequence of the lines currently in view.
///
/// Produced by [`LogViewer::visible_lines`]. Pulling a line measures it and
/// updates the viewer's widest-line tracking.
pub struct VisibleLines<'a, M: Metrics> {
    buffer: &'a LogBuffer,
    index: &'a LineIndex,
    metrics: &'a M,
    viewport: &'a mut Viewport,
    scrollbars: &'a mut ScrollSync,
    next_line: usize,
    remaining: usize,
}

impl<M: Metrics> Iterator for VisibleLines<'_, M> {
    type Item = VisibleLine;

    fn next(&mut self) -> Option<VisibleLine> {
        if self.remaining == 0 {
            return None;
        }
        let span = self.index.line(self.next_line)?;

        let width = self
            .metrics
            .text_width(self.buffer.slice(span.start..span.end));
        if self.viewport.observe_line_width(width) {
            self.scrollbars
                .set_horizontal_max(self.viewport.max_line_width());
        }

        let item = VisibleLine {
            index: self.next_line,
            span,
        };
        self.next_line += 1;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
