use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::flow::{Event, InputMode, Prompt};
use crate::tui::app::{App, Focus};

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            if matches!(app.session.input_mode, InputMode::Update { .. }) {
                app.dispatch(Event::AbandonEdit);
            }
            app.focus = Focus::List;
        }
        (_, KeyCode::Enter) => {
            let text = app.input.as_str().to_string();
            app.dispatch(Event::Submit(text));
            if matches!(app.session.prompt, Prompt::SetDeadline { .. }) {
                app.deadline_input.clear();
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.input.clear(),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => app.input.home(),
        (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => app.input.end(),
        (_, KeyCode::Backspace) => app.input.backspace(),
        (_, KeyCode::Delete) => app.input.delete(),
        (_, KeyCode::Left) => app.input.move_left(),
        (_, KeyCode::Right) => app.input.move_right(),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => app.input.insert_char(c),
        _ => {}
    }
}
