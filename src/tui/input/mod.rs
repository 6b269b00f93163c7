mod confirm;
mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Focus};
use crate::ops::flow::{Event, Prompt};

use confirm::handle_prompt;
use edit::handle_edit;
use navigate::handle_navigate;

/// Handle a key event for whatever currently has focus
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    // Help overlay swallows the key that closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // An open dialog intercepts all input
    if app.session.is_prompting() {
        handle_prompt(app, key);
        return;
    }

    match app.focus {
        Focus::List => handle_navigate(app, key),
        Focus::Input => handle_edit(app, key),
    }
}

/// Handle a bracketed paste: goes to the deadline field if that dialog is
/// open, otherwise to the input line when it has focus.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    if matches!(app.session.prompt, Prompt::SetDeadline { .. }) {
        app.deadline_input.insert_str(text);
        let value = app.deadline_input.as_str().to_string();
        app.dispatch(Event::SetDeadlineInput(value));
    } else if !app.session.is_prompting() && app.focus == Focus::Input {
        app.input.insert_str(text);
    }
}
