use logview_core::{LogBuffer, LogViewer, MonospaceMetrics, Rect, ScrollAxis};
use pretty_assertions::assert_eq;

/// One "pixel" per byte, one-pixel lines, a 20x4 text area: a terminal-like
/// grid with four lines per page.
fn viewer(text: &str) -> LogViewer<MonospaceMetrics> {
    let metrics = MonospaceMetrics::new(1.0, 1, Rect::new(0, 0, 20, 4));
    let mut viewer = LogViewer::new(metrics);
    viewer.load_buffer(LogBuffer::from(text));
    viewer
}

fn visible_indices(viewer: &mut LogViewer<MonospaceMetrics>) -> Vec<usize> {
    viewer.visible_lines().map(|line| line.index).collect()
}

#[test]
fn test_scrollbar_ranges_after_load() {
    let mut viewer = viewer("a\nb\nc\nd\ne\nf\ng\nh\ni\nj");

    let vertical = viewer.vertical_scrollbar();
    assert_eq!(vertical.value, 1);
    assert_eq!(vertical.page_size, 4);
    assert_eq!(vertical.min, 1);
    assert_eq!(vertical.max, 10);

    // Nothing measured yet: the horizontal range is still collapsed.
    let horizontal = viewer.horizontal_scrollbar();
    assert_eq!(horizontal.value, 1);
    assert_eq!(horizontal.page_size, 20);
    assert_eq!(horizontal.max, 1);
}

#[test]
fn test_scrolling_moves_the_window() {
    let mut viewer = viewer("a\nb\nc\nd\ne\nf\ng\nh\ni\nj");
    assert_eq!(visible_indices(&mut viewer), vec![0, 1, 2, 3, 4]);

    viewer.on_scroll(ScrollAxis::Vertical, 6);
    assert_eq!(viewer.viewport().top_line(), 5);
    assert_eq!(visible_indices(&mut viewer), vec![5, 6, 7, 8, 9]);

    // Out-of-range values clamp to the ends of the bar.
    viewer.on_scroll(ScrollAxis::Vertical, 999);
    assert_eq!(viewer.viewport().top_line(), 9);
    viewer.on_scroll(ScrollAxis::Vertical, -999);
    assert_eq!(viewer.viewport().top_line(), 0);
}

#[test]
fn test_max_width_converges_as_lines_scroll_in() {
    // Widest line ("ccccccccc", 9 bytes) sits on the third page.
    let text = "aa\na\naaa\na\na\na\na\na\na\nccccccccc";
    let mut viewer = viewer(text);

    let mut last_max = 0;
    let mut maxima = Vec::new();
    for page_start in [1, 5, 9] {
        viewer.on_scroll(ScrollAxis::Vertical, page_start);
        viewer.visible_lines().for_each(drop);
        let max = viewer.viewport().max_line_width();
        assert!(max >= last_max, "max width decreased: {} -> {}", last_max, max);
        last_max = max;
        maxima.push(max);
    }

    // First page: "aaa" is the widest seen. After the third page the true
    // maximum has been observed.
    assert_eq!(maxima, vec![3, 3, 9]);
    assert_eq!(viewer.horizontal_scrollbar().max, 9);
}

#[test]
fn test_full_recompute_matches_incremental_convergence() {
    let text = "aa\na\naaa\na\na\na\na\na\na\nccccccccc";
    let mut viewer = viewer(text);

    viewer.recompute_max_line_width();
    assert_eq!(viewer.viewport().max_line_width(), 9);
    assert_eq!(viewer.horizontal_scrollbar().max, 9);
}

#[test]
fn test_horizontal_scroll_clamps_to_measured_width() {
    let mut viewer = viewer("short\nmuch-longer-line-here\nx");
    viewer.recompute_max_line_width();
    let max = viewer.horizontal_scrollbar().max;
    assert_eq!(max, 21); // "much-longer-line-here"

    viewer.on_scroll(ScrollAxis::Horizontal, 999);
    assert_eq!(viewer.viewport().horizontal_offset(), max - 1);
    viewer.on_scroll(ScrollAxis::Horizontal, 1);
    assert_eq!(viewer.viewport().horizontal_offset(), 0);
}

#[test]
fn test_synthetic_trailing_line_has_zero_width() {
    let mut viewer = viewer("abc\n");
    viewer.recompute_max_line_width();
    assert_eq!(viewer.viewport().max_line_width(), 3);

    // The synthetic line is visible but contributes nothing to the range.
    let indices = visible_indices(&mut viewer);
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(viewer.viewport().max_line_width(), 3);
}

#[test]
fn test_shrinking_the_area_shrinks_the_page() {
    let mut viewer = viewer("a\nb\nc\nd\ne\nf\ng\nh");
    assert_eq!(viewer.lines_per_page(), 4);

    viewer.metrics_mut().area = Rect::new(0, 0, 20, 2);
    viewer.on_resize();
    assert_eq!(viewer.lines_per_page(), 2);
    assert_eq!(viewer.vertical_scrollbar().page_size, 2);
    assert_eq!(visible_indices(&mut viewer), vec![0, 1, 2]);
}

#[test]
fn test_empty_buffer_is_inert() {
    let mut viewer = viewer("");
    assert_eq!(viewer.line_index().line_count(), 0);
    assert_eq!(visible_indices(&mut viewer), Vec::<usize>::new());
    assert_eq!(viewer.vertical_scrollbar().max, 1);

    viewer.on_scroll(ScrollAxis::Vertical, 10);
    assert_eq!(viewer.viewport().top_line(), 0);
    viewer.recompute_max_line_width();
    assert_eq!(viewer.viewport().max_line_width(), 0);
}

#[test]
fn test_reload_resets_width_tracking() {
    let mut viewer = viewer("a-very-long-first-line\nb");
    viewer.visible_lines().for_each(drop);
    assert_eq!(viewer.viewport().max_line_width(), 22);

    viewer.load_buffer(LogBuffer::from("ab\ncd"));
    assert_eq!(viewer.viewport().max_line_width(), 0);
    assert_eq!(viewer.vertical_scrollbar().max, 2);
}
