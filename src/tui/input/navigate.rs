use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Filter;
use crate::ops::flow::Event;
use crate::tui::app::{App, Focus};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Cursor
        (_, KeyCode::Char('j') | KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k') | KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.session.view().len().saturating_sub(1);
        }

        // Filter tabs
        (_, KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right) => {
            let next = app.session.filter.next();
            set_filter(app, next);
        }
        (_, KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left) => {
            let prev = app.session.filter.prev();
            set_filter(app, prev);
        }
        (_, KeyCode::Char(c @ '1'..='3')) => {
            let idx = (c as usize) - ('1' as usize);
            set_filter(app, Filter::ALL[idx]);
        }

        // Input line
        (_, KeyCode::Char('i') | KeyCode::Char('a')) => app.focus = Focus::Input,

        // Per-task actions
        (_, KeyCode::Char(' ') | KeyCode::Char('x')) => {
            if let Some(index) = app.selected_index() {
                app.dispatch(Event::Toggle(index));
            }
        }
        (_, KeyCode::Char('e')) => {
            if let Some(index) = app.selected_index() {
                app.dispatch(Event::Edit(index));
                app.focus = Focus::Input;
            }
        }
        (_, KeyCode::Char('d') | KeyCode::Delete) => {
            if let Some(index) = app.selected_index() {
                app.dispatch(Event::RequestDelete(index));
            }
        }

        // Bulk actions
        (_, KeyCode::Char('D')) => {
            app.dispatch(Event::RequestDeleteAll);
        }
        (_, KeyCode::Char('m')) => {
            app.dispatch(Event::ToggleAll);
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.session.view().len();
    if len == 0 {
        app.cursor = 0;
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(len - 1);
}

fn set_filter(app: &mut App, filter: Filter) {
    if app.session.filter != filter {
        app.dispatch(Event::SetFilter(filter));
        app.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{press, type_str};
    use super::*;
    use crate::ops::flow::{InputMode, Prompt};
    use crate::tui::render::test_helpers::app_with_tasks;

    #[test]
    fn cursor_moves_within_view() {
        let mut app = app_with_tasks(&[("a", false), ("b", false), ("c", false)]);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 2);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn tabs_switch_filter_and_reset_cursor() {
        let mut app = app_with_tasks(&[("a", false), ("b", true)]);
        app.cursor = 1;
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session.filter, Filter::Pending);
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.session.filter, Filter::Completed);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.session.filter, Filter::Pending);
    }

    #[test]
    fn toggle_uses_underlying_index() {
        let mut app = app_with_tasks(&[("a", true), ("b", false), ("c", false)]);
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.tasks.get(2).unwrap().completed);
        assert!(!app.session.tasks.get(1).unwrap().completed);
    }

    #[test]
    fn delete_opens_dialog_for_selected_task() {
        let mut app = app_with_tasks(&[("a", true), ("b", false)]);
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.session.prompt, Prompt::ConfirmDelete { index: 1 });
    }

    #[test]
    fn delete_on_empty_view_does_nothing() {
        let mut app = app_with_tasks(&[("a", false)]);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.session.prompt, Prompt::Idle);
    }

    #[test]
    fn edit_loads_text_and_focuses_input() {
        let mut app = app_with_tasks(&[("a", false), ("b", false)]);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.focus, Focus::Input);
        assert_eq!(app.input.as_str(), "b");
        assert_eq!(app.session.input_mode, InputMode::Update { index: 1 });
        type_str(&mut app, "2");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.tasks.get(1).unwrap().text, "b2");
        assert_eq!(app.session.input_mode, InputMode::Create);
    }

    #[test]
    fn bulk_keys() {
        let mut app = app_with_tasks(&[("a", false), ("b", false)]);
        press(&mut app, KeyCode::Char('m'));
        assert!(app.session.tasks.iter().all(|t| t.completed));
        press(&mut app, KeyCode::Char('D'));
        assert_eq!(app.session.prompt, Prompt::ConfirmDeleteAll);
    }

    #[test]
    fn q_quits() {
        let mut app = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
