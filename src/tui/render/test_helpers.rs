use chrono::{TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store::MemoryStore;
use crate::model::{DEFAULT_STORE_KEY, Task, TaskList};
use crate::ops::flow::Session;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app over an in-memory store holding the given `(text, completed)` tasks.
pub fn app_with_tasks(tasks: &[(&str, bool)]) -> App {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    let list: Vec<Task> = tasks
        .iter()
        .map(|(text, completed)| {
            let mut task = Task::new(text.to_string(), created, None);
            task.completed = *completed;
            task
        })
        .collect();
    App::new(
        Session::new(TaskList::from(list)),
        Box::new(MemoryStore::new()),
        DEFAULT_STORE_KEY.to_string(),
    )
}
