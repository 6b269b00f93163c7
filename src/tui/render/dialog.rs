use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::flow::Prompt;
use crate::tui::app::App;
use crate::util::text::truncate_to_width;

use super::centered_rect_fixed;

const DEADLINE_HINT: &str = "YYYY-MM-DDTHH:MM";

/// Render whichever modal dialog the session has open
pub fn render_dialog(frame: &mut Frame, app: &App, area: Rect) {
    match &app.session.prompt {
        Prompt::Idle => {}
        Prompt::ConfirmDelete { .. } => render_confirm(
            frame,
            app,
            area,
            "Confirm Delete",
            "Are you sure you want to delete this task?",
        ),
        Prompt::ConfirmDeleteAll => render_confirm(
            frame,
            app,
            area,
            "Confirm Delete All",
            "Are you sure you want to delete all tasks?",
        ),
        Prompt::SetDeadline { text, .. } => render_deadline(frame, app, area, text),
    }
}

fn render_confirm(frame: &mut Frame, app: &App, area: Rect, title: &str, message: &str) {
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled(format!(" {}", title), header_style)),
        Line::from(Span::styled("", text_style)),
        Line::from(Span::styled(format!("  {}", message), text_style)),
        Line::from(Span::styled("", text_style)),
        Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("y", dim_style),
            Span::styled(" Yes  ", text_style),
            Span::styled("n", dim_style),
            Span::styled(" No", text_style),
        ]),
    ];

    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup);
}

fn render_deadline(frame: &mut Frame, app: &App, area: Rect, task_text: &str) {
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let field = if app.deadline_input.is_empty() {
        Span::styled(DEADLINE_HINT, dim_style)
    } else {
        Span::styled(
            app.deadline_input.as_str().to_string(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )
    };

    let lines = vec![
        Line::from(Span::styled(" Set Deadline", header_style)),
        Line::from(Span::styled("", text_style)),
        Line::from(Span::styled(
            format!("  {}", truncate_to_width(task_text, inner_w.saturating_sub(2))),
            text_style,
        )),
        Line::from(Span::styled("", text_style)),
        Line::from(vec![Span::styled("  Deadline: ", text_style), field]),
        Line::from(Span::styled("", text_style)),
        Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("Enter", dim_style),
            Span::styled(" Save Deadline  ", text_style),
            Span::styled("Esc", dim_style),
            Span::styled(" Cancel", text_style),
        ]),
    ];

    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup);

    // Field row: border + title + blank + text + blank
    let field_y = popup.y + 5;
    let field_x =
        popup.x + 1 + "  Deadline: ".len() as u16 + app.deadline_input.cursor_col() as u16;
    if field_y < popup.bottom().saturating_sub(1) && field_x < popup.right().saturating_sub(1) {
        frame.set_cursor_position((field_x, field_y));
    }
}
