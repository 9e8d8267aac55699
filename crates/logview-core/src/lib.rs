#![warn(missing_docs)]
//! logview-core - Headless Log-Viewer Viewport Engine
//!
//! # Overview
//!
//! `logview-core` is the engine behind a log-file viewer: it maintains a line
//! index over an immutable byte buffer, maps pointer and scrollbar input to
//! byte offsets, tracks a selection and a logical cursor, and keeps the
//! horizontal scroll range converging as lines are measured. It does not
//! paint: the rendering backend asks "what goes where" and gets spans and
//! offsets back, never pixels.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  LogViewer (events, notifications)          │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  HitTester / ScrollSync / Search            │  ← Input Mapping
//! ├─────────────────────────────────────────────┤
//! │  SelectionModel & ClickTracker              │  ← Gesture State
//! ├─────────────────────────────────────────────┤
//! │  Viewport (top line, widest line)           │  ← Scroll State
//! ├─────────────────────────────────────────────┤
//! │  LineIndex over LogBuffer                   │  ← Line Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Text measurement is an injected capability ([`Metrics`]): the engine never
//! touches a font or a graphics context, so the whole stack runs
//! deterministically under test with [`MonospaceMetrics`].
//!
//! # Quick Start
//!
//! ```rust
//! use logview_core::{LogBuffer, LogViewer, MonospaceMetrics, PointerModifiers, Rect};
//!
//! // 8px per byte, 16px lines, a 640x480 text area.
//! let metrics = MonospaceMetrics::new(8.0, 16, Rect::new(0, 0, 640, 480));
//! let mut viewer = LogViewer::new(metrics);
//!
//! let line_count = viewer.load_buffer(LogBuffer::from("error: disk full\nwarn: retrying\n"));
//! assert_eq!(line_count, 3);
//!
//! // Double-click the word under (8, 0): selects "error".
//! viewer.on_pointer_down(8, 0, PointerModifiers::default(), 2);
//! assert_eq!(viewer.selected_text(), b"error");
//!
//! // The renderer pulls the visible window each paint.
//! let visible: Vec<_> = viewer.visible_lines().collect();
//! assert_eq!(visible.len(), 3);
//! ```
//!
//! # Concurrency Model
//!
//! Single-threaded and callback-driven: every operation runs to completion on
//! the thread that owns the viewport, and nothing here blocks or suspends.
//! The one timing concern - double/triple-click detection - is a monotonic
//! clock comparison, not a timer.
//!
//! # Module Description
//!
//! - [`buffer`] - refcounted immutable byte buffer
//! - [`line_index`] - line spans over the buffer
//! - [`measure`] - injected measurement capability
//! - [`viewport`] - scroll position and widest-line tracking
//! - [`hit`] - pointer-to-offset mapping
//! - [`selection`] - selection, cursor, word/line selection rules
//! - [`click`] - double/triple-click classification
//! - [`scroll`] - host scrollbar reconciliation
//! - [`search`] - byte-offset buffer search
//! - [`viewer`] - the facade wiring it all together

pub mod buffer;
pub mod click;
pub mod hit;
pub mod line_index;
pub mod measure;
pub mod scroll;
pub mod search;
pub mod selection;
pub mod viewer;
pub mod viewport;

pub use buffer::LogBuffer;
pub use click::{ClickKind, ClickTracker, TRIPLE_CLICK_WINDOW};
pub use hit::HitTester;
pub use line_index::{LineIndex, LineSpan};
pub use measure::{Metrics, MonospaceMetrics, Rect};
pub use scroll::{ScrollAxis, ScrollSync, ScrollbarModel};
pub use search::{SearchError, SearchMatch, SearchOptions, find_all, find_next, find_prev};
pub use selection::{
    Selection, SelectionModel, SelectionState, WORD_SEPARATORS, is_word_separator,
};
pub use viewer::{
    LogViewer, PointerModifiers, ViewError, ViewerEvent, ViewerEventCallback, ViewerShortcut,
    VisibleLine, VisibleLines,
};
pub use viewport::Viewport;
