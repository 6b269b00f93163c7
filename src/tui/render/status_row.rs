use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};

/// Render the bulk-action row; hidden while the list is empty
pub fn render_bulk_actions(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    if app.session.tasks.is_empty() {
        frame.render_widget(Paragraph::new("").style(Style::default().bg(bg)), area);
        return;
    }

    let key_style = Style::default().fg(app.theme.dim).bg(bg);
    let spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled("D", key_style),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled("[ Clear All ]", Style::default().fg(app.theme.red).bg(bg)),
        Span::styled("   ", Style::default().bg(bg)),
        Span::styled("m", key_style),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            format!("[ {} ]", app.session.toggle_all_label()),
            Style::default().fg(app.theme.green).bg(bg),
        ),
        Span::styled(
            format!(
                "   {}/{} done",
                app.session.tasks.completed_count(),
                app.session.tasks.len()
            ),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(message) = &app.status_message {
        Line::from(Span::styled(
            message.clone(),
            Style::default().fg(app.theme.yellow).bg(bg),
        ))
    } else {
        let hint = match app.focus {
            Focus::List => "i add  e edit  space toggle  d delete  ? help",
            Focus::Input => "Enter submit  Esc back",
        };
        let hint_width = hint.chars().count();
        if hint_width < width {
            Line::from(vec![
                Span::styled(" ".repeat(width - hint_width), Style::default().bg(bg)),
                Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)),
            ])
        } else {
            Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::flow::Event;
    use crate::tui::render::test_helpers::*;

    fn render_bulk(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| {
            render_bulk_actions(frame, app, area);
        })
    }

    #[test]
    fn bulk_actions_hidden_when_empty() {
        let app = app_with_tasks(&[]);
        assert_eq!(render_bulk(&app), "");
    }

    #[test]
    fn toggle_all_label_flips() {
        let mut app = app_with_tasks(&[("a", false), ("b", false)]);
        let output = render_bulk(&app);
        assert!(output.contains("[ Clear All ]"));
        assert!(output.contains("[ Done All ]"));
        assert!(output.contains("0/2 done"));

        app.dispatch(Event::ToggleAll);
        let output = render_bulk(&app);
        assert!(output.contains("[ Undone All ]"));
        assert!(output.contains("2/2 done"));
    }

    #[test]
    fn status_message_replaces_hints() {
        let mut app = app_with_tasks(&[]);
        let render = |app: &App| {
            render_to_string(TERM_W, 1, |frame, area| {
                render_status_row(frame, app, area);
            })
        };
        assert!(render(&app).contains("? help"));
        app.status_message = Some("save failed: disk full".into());
        let output = render(&app);
        assert!(output.contains("save failed"));
        assert!(!output.contains("? help"));
    }
}
