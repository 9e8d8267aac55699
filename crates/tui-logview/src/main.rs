//! TUI log viewer demo.
//!
//! Terminal embedding of the `logview-core` engine built with crossterm and
//! ratatui: the terminal grid acts as the rendering backend, so one character
//! cell is one "pixel" of the measurement capability.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tui-logview -- <file_path>
//! ```
//!
//! # Keys
//!
//! - Mouse click/drag: place caret, select; double-click selects a word,
//!   triple-click a line; Shift+click extends
//! - Up/Down/PageUp/PageDown/Home/End: vertical scrolling
//! - Left/Right: horizontal scrolling
//! - Mouse wheel: scroll by 3 lines
//! - Ctrl+C: copy selection (byte count shown in the status line)
//! - Ctrl+A: select all
//! - `/`: search input, Enter to find; `n` / `N`: next / previous match
//! - `q` / Esc: quit

use std::env;
use std::fs;
use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use logview_core::{
    LineSpan, LogBuffer, LogViewer, MonospaceMetrics, PointerModifiers, Rect, ScrollAxis,
    SearchOptions, ViewerShortcut,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Terminal mouse events carry no click counter, so the demo synthesizes
/// one: repeated presses at the same cell within half a second cycle
/// single -> double -> triple.
#[derive(Default)]
struct ClickCounter {
    last: Option<(Instant, u16, u16)>,
    count: u8,
}

impl ClickCounter {
    fn observe(&mut self, column: u16, row: u16) -> u8 {
        let now = Instant::now();
        let chained = self.last.is_some_and(|(at, c, r)| {
            now.duration_since(at) <= Duration::from_millis(500) && c == column && r == row
        });
        self.count = if chained { self.count % 3 + 1 } else { 1 };
        self.last = Some((now, column, row));
        self.count
    }
}

struct App {
    viewer: LogViewer<MonospaceMetrics>,
    file_name: String,
    search_input: Option<String>,
    query: String,
    status: String,
    clicks: ClickCounter,
}

fn main() -> Result<()> {
    let path = env::args().nth(1).context("usage: tui-logview <file>")?;
    let data = fs::read(&path).with_context(|| format!("reading {path}"))?;

    let metrics = MonospaceMetrics::new(1.0, 1, Rect::new(0, 0, 80, 24));
    let mut viewer = LogViewer::new(metrics);
    viewer.load_buffer(LogBuffer::from(data));

    let app = App {
        viewer,
        file_name: path,
        search_input: None,
        query: String::new(),
        status: String::new(),
        clicks: ClickCounter::default(),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(&mut app, key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
            _ => {}
        }
    }
}

fn draw(frame: &mut ratatui::Frame<'_>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let text_area = chunks[0];
    let area = Rect::new(
        i32::from(text_area.x),
        i32::from(text_area.y),
        i32::from(text_area.width),
        i32::from(text_area.height),
    );
    if app.viewer.metrics().area != area {
        app.viewer.metrics_mut().area = area;
        app.viewer.on_resize();
    }

    let visible: Vec<_> = app.viewer.visible_lines().collect();
    let lines: Vec<Line> = visible
        .iter()
        .map(|line| {
            let bytes = app.viewer.buffer().slice(line.span.start..line.span.end);
            styled_line(bytes, line.span, app.viewer.selection_range_for_line(line.span))
        })
        .collect();

    let offset = u16::try_from(app.viewer.viewport().horizontal_offset()).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((0, offset)), text_area);

    frame.render_widget(
        Paragraph::new(status_line(app)).style(Style::default().add_modifier(Modifier::REVERSED)),
        chunks[1],
    );
}

fn styled_line(bytes: &[u8], span: LineSpan, selected: Option<(usize, usize)>) -> Line<'_> {
    match selected {
        Some((begin, end)) => {
            let begin = begin - span.start;
            let end = end - span.start;
            Line::from(vec![
                Span::raw(String::from_utf8_lossy(&bytes[..begin])),
                Span::styled(
                    String::from_utf8_lossy(&bytes[begin..end]),
                    Style::default().add_modifier(Modifier::REVERSED),
                ),
                Span::raw(String::from_utf8_lossy(&bytes[end..])),
            ])
        }
        None => Line::raw(String::from_utf8_lossy(bytes)),
    }
}

fn status_line(app: &App) -> String {
    if let Some(input) = &app.search_input {
        return format!("/{input}");
    }
    let (line, column) = app.viewer.cursor_position().unwrap_or((0, 0));
    format!(
        " {}    ln : {}/{}    col : {}    pos : {}    {}",
        app.file_name,
        line + 1,
        app.viewer.line_index().line_count(),
        column,
        app.viewer.cursor(),
        app.status,
    )
}

/// Returns `true` when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if app.search_input.is_some() {
        match key.code {
            KeyCode::Enter => {
                app.query = app.search_input.take().unwrap_or_default();
                run_find(app, true);
            }
            KeyCode::Esc => app.search_input = None,
            KeyCode::Backspace => {
                if let Some(input) = app.search_input.as_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = app.search_input.as_mut() {
                    input.push(c);
                }
            }
            _ => {}
        }
        return false;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if ctrl => {
            app.status = match app.viewer.on_keyboard_shortcut(ViewerShortcut::Copy) {
                Some(bytes) => format!("copied {} bytes", bytes.len()),
                None => "nothing selected".to_string(),
            };
        }
        KeyCode::Char('a') if ctrl => {
            let _ = app.viewer.on_keyboard_shortcut(ViewerShortcut::SelectAll);
        }
        KeyCode::Char('/') => app.search_input = Some(String::new()),
        KeyCode::Char('n') => run_find(app, true),
        KeyCode::Char('N') => run_find(app, false),
        KeyCode::Up => scroll_lines(app, -1),
        KeyCode::Down => scroll_lines(app, 1),
        KeyCode::PageUp => scroll_lines(app, -(app.viewer.lines_per_page() as i32)),
        KeyCode::PageDown => scroll_lines(app, app.viewer.lines_per_page() as i32),
        KeyCode::Left => scroll_columns(app, -4),
        KeyCode::Right => scroll_columns(app, 4),
        KeyCode::Home => app.viewer.on_scroll(ScrollAxis::Vertical, 1),
        KeyCode::End => app.viewer.on_scroll(ScrollAxis::Vertical, i32::MAX),
        _ => {}
    }
    false
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let count = app.clicks.observe(mouse.column, mouse.row);
            let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
            app.viewer.on_pointer_down(
                i32::from(mouse.column),
                i32::from(mouse.row),
                PointerModifiers { shift },
                count,
            );
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.viewer
                .on_pointer_drag(i32::from(mouse.column), i32::from(mouse.row));
        }
        MouseEventKind::ScrollUp => scroll_lines(app, -3),
        MouseEventKind::ScrollDown => scroll_lines(app, 3),
        _ => {}
    }
}

fn scroll_lines(app: &mut App, delta: i32) {
    let value = app.viewer.vertical_scrollbar().value.saturating_add(delta);
    app.viewer.on_scroll(ScrollAxis::Vertical, value);
}

fn scroll_columns(app: &mut App, delta: i32) {
    let value = app
        .viewer
        .horizontal_scrollbar()
        .value
        .saturating_add(delta);
    app.viewer.on_scroll(ScrollAxis::Horizontal, value);
}

fn run_find(app: &mut App, forward: bool) {
    if app.query.is_empty() {
        return;
    }
    let options = SearchOptions::default();
    let result = if forward {
        app.viewer.find_next(&app.query, options)
    } else {
        app.viewer.find_prev(&app.query, options)
    };
    app.status = match result {
        Ok(Some(_)) => format!("found \"{}\"", app.query),
        Ok(None) => format!("no more matches for \"{}\"", app.query),
        Err(err) => err.to_string(),
    };
}
