use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::tui::app::{App, Focus};
use crate::util::text::{display_width, format_created, format_deadline, truncate_to_width};

/// Render the filtered task list, or the filter's placeholder when it is empty
pub fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let view = app.session.view();

    if let Some(placeholder) = view.placeholder() {
        let empty = Paragraph::new(Line::from(Span::styled(
            placeholder,
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    if height == 0 {
        return;
    }
    let offset = app.cursor.saturating_sub(height - 1);
    let show_cursor = app.focus == Focus::List && !app.session.is_prompting();

    let lines: Vec<Line> = view
        .entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(pos, entry)| {
            task_line(
                app,
                entry.task,
                area.width as usize,
                show_cursor && pos == app.cursor,
            )
        })
        .collect();

    let list = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(list, area);
}

fn task_line<'a>(app: &App, task: &'a Task, width: usize, selected: bool) -> Line<'a> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let (marker, marker_color) = if task.completed {
        ("[x] ", app.theme.green)
    } else {
        ("[ ] ", app.theme.text)
    };

    let created = format_created(&task.created_at);
    let deadline = task
        .deadline
        .as_ref()
        .map(|d| format!("  Deadline: {}", format_deadline(d)))
        .unwrap_or_default();
    let marker_w = display_width(marker);
    let meta_w = display_width(&created) + display_width(&deadline);

    // Drop the timestamps before squeezing the text to nothing
    let show_meta = width >= marker_w + meta_w + 2 + 8;
    let text_budget = if show_meta {
        width - marker_w - meta_w - 2
    } else {
        width.saturating_sub(marker_w)
    };
    let text = truncate_to_width(&task.text, text_budget);
    let text_w = display_width(&text);

    let mut text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    if task.completed {
        text_style = text_style
            .fg(app.theme.dim)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    if selected {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(marker_color).bg(bg)),
        Span::styled(text, text_style),
    ];
    if show_meta {
        let padding = width - marker_w - text_w - meta_w;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(created, Style::default().fg(app.theme.dim).bg(bg)));
        if !deadline.is_empty() {
            spans.push(Span::styled(
                deadline,
                Style::default().fg(app.theme.purple).bg(bg),
            ));
        }
    } else {
        let padding = width.saturating_sub(marker_w + text_w);
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
    }
    Line::from(spans)
}
