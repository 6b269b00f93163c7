use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::flow::{Event, Prompt};
use crate::tui::app::App;

pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    if matches!(app.session.prompt, Prompt::SetDeadline { .. }) {
        handle_deadline(app, key);
        return;
    }
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('y') | KeyCode::Enter) => {
            app.dispatch(Event::Confirm);
        }
        (_, KeyCode::Char('n') | KeyCode::Esc) => {
            app.dispatch(Event::Cancel);
        }
        _ => {}
    }
}

fn handle_deadline(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => {
            // Rejected deadlines leave the dialog open, as if nothing happened
            if app.dispatch(Event::Confirm).changed {
                app.deadline_input.clear();
            }
            return;
        }
        (_, KeyCode::Esc) => {
            app.dispatch(Event::Cancel);
            app.deadline_input.clear();
            return;
        }
        (_, KeyCode::Backspace) => app.deadline_input.backspace(),
        (_, KeyCode::Delete) => app.deadline_input.delete(),
        (_, KeyCode::Left) => app.deadline_input.move_left(),
        (_, KeyCode::Right) => app.deadline_input.move_right(),
        (_, KeyCode::Home) => app.deadline_input.home(),
        (_, KeyCode::End) => app.deadline_input.end(),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.deadline_input.insert_char(c)
        }
        _ => return,
    }
    let value = app.deadline_input.as_str().to_string();
    app.dispatch(Event::SetDeadlineInput(value));
}

#[cfg(test)]
mod tests {
    use super::super::tests::{press, type_str};
    use super::*;
    use crate::ops::flow::InputMode;
    use crate::tui::app::Focus;
    use crate::tui::render::test_helpers::app_with_tasks;

    #[test]
    fn y_confirms_and_n_cancels_delete() {
        let mut app = app_with_tasks(&[("a", false), ("b", false)]);
        app.dispatch(Event::RequestDelete(0));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.session.prompt, Prompt::Idle);
        assert_eq!(app.session.tasks.len(), 2);

        app.dispatch(Event::RequestDelete(0));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.session.tasks.len(), 1);
        assert_eq!(app.session.tasks.get(0).unwrap().text, "b");
    }

    #[test]
    fn deleting_edited_task_clears_input() {
        let mut app = app_with_tasks(&[("a", false), ("b", false)]);
        app.dispatch(Event::Edit(1));
        assert_eq!(app.input.as_str(), "b");

        app.dispatch(Event::RequestDelete(1));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.input.as_str(), "");
        assert_eq!(app.session.input_mode, InputMode::Create);
    }

    #[test]
    fn other_keys_leave_dialog_open() {
        let mut app = app_with_tasks(&[("a", false)]);
        app.dispatch(Event::RequestDeleteAll);
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.session.prompt, Prompt::ConfirmDeleteAll);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Enter);
        assert!(app.session.tasks.is_empty());
    }

    #[test]
    fn deadline_dialog_needs_a_deadline() {
        let mut app = app_with_tasks(&[]);
        app.focus = Focus::Input;
        type_str(&mut app, "Task");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.session.prompt, Prompt::SetDeadline { .. }));
        assert!(app.session.tasks.is_empty());

        // y and n are ordinary characters here
        type_str(&mut app, "ny");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.session.prompt, Prompt::SetDeadline { .. }));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);

        type_str(&mut app, "2025-01-01");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.tasks.len(), 1);
    }

    #[test]
    fn cancel_deadline_keeps_input_text() {
        let mut app = app_with_tasks(&[]);
        app.focus = Focus::Input;
        type_str(&mut app, "Task");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "2025");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session.prompt, Prompt::Idle);
        assert!(app.session.tasks.is_empty());
        assert!(app.deadline_input.is_empty());
        assert_eq!(app.input.as_str(), "Task");
    }
}
