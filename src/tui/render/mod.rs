pub mod dialog;
pub mod header;
pub mod help_overlay;
pub mod status_row;
pub mod tab_bar;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title | input box | tabs + separator | list | bulk actions | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + spacing
            Constraint::Length(3), // bordered input box
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // task list
            Constraint::Length(1), // bulk actions
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_title(frame, app, chunks[0]);
    header::render_input_box(frame, app, chunks[1]);
    tab_bar::render_tab_bar(frame, app, chunks[2]);
    task_list::render_task_list(frame, app, chunks[3]);
    status_row::render_bulk_actions(frame, app, chunks[4]);
    status_row::render_status_row(frame, app, chunks[5]);

    // Dialogs render on top of everything
    if app.session.is_prompting() {
        dialog::render_dialog(frame, app, area);
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

/// A rectangle of fixed size centered in `area`, clamped to fit
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
