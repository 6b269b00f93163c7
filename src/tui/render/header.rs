use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};

const INPUT_PLACEHOLDER: &str = "Do it!";

/// Render the "T O D O" title line
pub fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .fg(app.theme.highlight)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    let title = Paragraph::new(Line::from(Span::styled("T O D O", style)))
        .alignment(Alignment::Center)
        .style(Style::default().bg(app.theme.background));
    frame.render_widget(title, area);
}

/// Render the bordered input line with its submit button label
pub fn render_input_box(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Input && !app.session.is_prompting();
    let border_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let button = format!("[ {} ]", app.session.submit_label());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(button.chars().count() as u16 + 1),
        ])
        .split(inner);
    let text_area = chunks[0];

    // Keep the cursor visible by scrolling long input horizontally
    let cursor_col = app.input.cursor_col();
    let width = text_area.width as usize;
    let offset = if width == 0 {
        0
    } else {
        cursor_col.saturating_sub(width - 1)
    };

    let text = if app.input.is_empty() {
        Paragraph::new(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        Paragraph::new(Span::styled(
            app.input.as_str().to_string(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
        .scroll((0, offset as u16))
    };
    frame.render_widget(text.style(Style::default().bg(bg)), text_area);

    let button_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };
    let button_widget = Paragraph::new(Span::styled(button, button_style))
        .alignment(Alignment::Right)
        .style(Style::default().bg(bg));
    frame.render_widget(button_widget, chunks[1]);

    if focused && width > 0 {
        let x = text_area.x + (cursor_col - offset) as u16;
        frame.set_cursor_position((x, text_area.y));
    }
}
