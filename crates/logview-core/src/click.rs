//! Multi-click classification.
//!
//! Double and triple clicks select words and lines. Platform click counters
//! are trusted when present, but some platforms collapse their counter after
//! two clicks and report the third press as a fresh single click. The
//! tracker re-detects that case by comparing the press against the time and
//! position of the previous double-click; the comparison is a monotonic
//! clock read, never a scheduled timer.

use std::time::{Duration, Instant};

/// How long after a double-click a press at the same position still chains
/// into a triple click.
pub const TRIPLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Interpretation of one pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Place a caret / start a drag.
    Single,
    /// Select the word under the pointer.
    Double,
    /// Select the line under the pointer.
    Triple,
}

/// Classifies pointer presses into single/double/triple gestures.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_double: Option<(Instant, i32, i32)>,
}

impl ClickTracker {
    /// A tracker with no click history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the click history. Called when a new buffer is loaded.
    pub fn reset(&mut self) {
        self.last_double = None;
    }

    /// Classify a press at `(x, y)`.
    ///
    /// `click_count` is the platform's own counter: 1 for a single click,
    /// 2 for a double, 3 or more for a triple. A press within
    /// [`TRIPLE_CLICK_WINDOW`] of the previous double-click at the exact
    /// same position is a triple click regardless of the reported counter;
    /// any press outside that tolerance resets the chain.
    pub fn classify(&mut self, now: Instant, x: i32, y: i32, click_count: u8) -> ClickKind {
        let chains_triple = self.last_double.is_some_and(|(at, px, py)| {
            now.duration_since(at) <= TRIPLE_CLICK_WINDOW && px == x && py == y
        });

        if click_count >= 3 || chains_triple {
            self.last_double = None;
            ClickKind::Triple
        } else if click_count == 2 {
            self.last_double = Some((now, x, y));
            ClickKind::Double
        } else {
            self.last_double = None;
            ClickKind::Single
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_counts_are_honored() {
        let mut tracker = ClickTracker::new();
        let now = Instant::now();
        assert_eq!(tracker.classify(now, 10, 10, 1), ClickKind::Single);
        assert_eq!(tracker.classify(now, 10, 10, 2), ClickKind::Double);
        assert_eq!(tracker.classify(now, 10, 10, 3), ClickKind::Triple);
    }

    #[test]
    fn test_collapsed_counter_still_yields_triple() {
        let mut tracker = ClickTracker::new();
        let base = Instant::now();
        assert_eq!(tracker.classify(base, 10, 10, 2), ClickKind::Double);
        // The platform reports the third press as a fresh single click.
        let third = base + Duration::from_millis(200);
        assert_eq!(tracker.classify(third, 10, 10, 1), ClickKind::Triple);
        // The chain is consumed; the next single click is single again.
        let fourth = third + Duration::from_millis(100);
        assert_eq!(tracker.classify(fourth, 10, 10, 1), ClickKind::Single);
    }

    #[test]
    fn test_timed_out_press_is_single() {
        let mut tracker = ClickTracker::new();
        let base = Instant::now();
        tracker.classify(base, 10, 10, 2);
        let late = base + Duration::from_millis(700);
        assert_eq!(tracker.classify(late, 10, 10, 1), ClickKind::Single);
    }

    #[test]
    fn test_moved_press_is_single() {
        let mut tracker = ClickTracker::new();
        let base = Instant::now();
        tracker.classify(base, 10, 10, 2);
        let soon = base + Duration::from_millis(100);
        assert_eq!(tracker.classify(soon, 11, 10, 1), ClickKind::Single);
    }

    #[test]
    fn test_reset_forgets_chain() {
        let mut tracker = ClickTracker::new();
        let base = Instant::now();
        tracker.classify(base, 10, 10, 2);
        tracker.reset();
        let soon = base + Duration::from_millis(100);
        assert_eq!(tracker.classify(soon, 10, 10, 1), ClickKind::Single);
    }
}
