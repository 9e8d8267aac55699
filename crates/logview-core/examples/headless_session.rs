//! Headless selection session: drive the engine without any UI.
//!
//! ```bash
//! cargo run -p logview-core --example headless_session
//! ```

use logview_core::{
    LogBuffer, LogViewer, MonospaceMetrics, PointerModifiers, Rect, ScrollAxis, ViewerShortcut,
};

fn main() {
    // 8px per byte, 16px lines, a 640x320 text area.
    let metrics = MonospaceMetrics::new(8.0, 16, Rect::new(0, 0, 640, 320));
    let mut viewer = LogViewer::new(metrics);

    let log = "boot: ok\nnet: link up\nerror: disk full\nnet: retrying\n";
    let lines = viewer.load_buffer(LogBuffer::from(log));
    println!("loaded {lines} lines");

    viewer.subscribe(|event| println!("  event: {event:?}"));

    // Double-click at (8, 36): the word "error" on the third line.
    viewer.on_pointer_down(8, 36, PointerModifiers::default(), 2);
    println!(
        "selected: {:?}",
        String::from_utf8_lossy(viewer.selected_text())
    );

    if let Some(bytes) = viewer.on_keyboard_shortcut(ViewerShortcut::Copy) {
        println!("copied {} bytes", bytes.len());
    }

    // Scroll down one line and list what a renderer would paint.
    viewer.on_scroll(ScrollAxis::Vertical, 2);
    let visible: Vec<_> = viewer.visible_lines().collect();
    for line in visible {
        let text = viewer.buffer().slice(line.span.start..line.span.end);
        let highlight = viewer.selection_range_for_line(line.span);
        println!(
            "line {:>2} {:?} highlight {:?}",
            line.index,
            String::from_utf8_lossy(text),
            highlight
        );
    }
}
