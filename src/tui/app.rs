use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event as TermEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{error, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::store::{FileStore, KeyValueStore, load_tasks, resolve_store_dir, save_tasks};
use crate::logging;
use crate::ops::flow::{Event, Outcome, Session};

use super::input;
use super::input_line::InputLine;
use super::render;
use super::theme::Theme;

/// Which part of the main screen receives keys when no dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Input,
}

/// Main application state
pub struct App {
    pub session: Session,
    pub store: Box<dyn KeyValueStore>,
    pub store_key: String,
    pub focus: Focus,
    /// The "Do it!" line used for create and update
    pub input: InputLine,
    /// Deadline field of the "Set Deadline" dialog
    pub deadline_input: InputLine,
    /// Cursor position within the filtered view
    pub cursor: usize,
    pub theme: Theme,
    pub should_quit: bool,
    /// Transient message for the status row
    pub status_message: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new(session: Session, store: Box<dyn KeyValueStore>, store_key: String) -> Self {
        App {
            session,
            store,
            store_key,
            focus: Focus::List,
            input: InputLine::new(),
            deadline_input: InputLine::new(),
            cursor: 0,
            theme: Theme::default(),
            should_quit: false,
            status_message: None,
            show_help: false,
        }
    }

    /// List index of the task under the cursor
    pub fn selected_index(&self) -> Option<usize> {
        self.session.view().underlying_index(self.cursor)
    }

    /// Route an event through the session and write changes through to the store.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        let outcome = self.session.apply(event);
        if let Some(text) = &outcome.input {
            self.input.set(text);
        }
        if outcome.changed {
            self.save();
        }
        self.clamp_cursor();
        outcome
    }

    /// Persist the task list; failures are reported, never fatal.
    pub fn save(&mut self) {
        if let Err(e) = save_tasks(&mut *self.store, &self.store_key, &self.session.tasks) {
            error!("event=store_save module=tui status=error error=\"{}\"", e);
            self.status_message = Some(format!("save failed: {}", e));
        }
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.session.view().len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    pub fn ui_state(&self) -> UiState {
        UiState {
            filter: self.session.filter,
            cursor: self.cursor,
        }
    }

    pub fn restore_ui_state(&mut self, state: UiState) {
        self.session.filter = state.filter;
        self.cursor = state.cursor;
        self.clamp_cursor();
    }
}

/// Run the TUI application
pub fn run(store_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let store_dir = resolve_store_dir(store_dir)?;
    let config = read_config(&store_dir)?;

    if let Err(e) = logging::init_for_store(&config.log.level, &store_dir) {
        // The terminal is not ours yet, so this still reaches the user
        eprintln!("warning: logging disabled: {}", e);
    }

    let store_key = config.store_key().to_string();
    let store = FileStore::new(&store_dir);
    let tasks = load_tasks(&store, &store_key);

    let mut app = App::new(Session::new(tasks), Box::new(store), store_key);
    app.theme = Theme::from_config(&config.ui);
    if let Some(state) = read_ui_state(&store_dir) {
        app.restore_ui_state(state);
    }
    info!(
        "event=tui_start module=tui status=ok store_dir={} tasks={} filter={}",
        store_dir.display(),
        app.session.tasks.len(),
        app.session.filter
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Browsing an empty store leaves no directory behind
    if store_dir.is_dir() {
        if let Err(e) = write_ui_state(&store_dir, &app.ui_state()) {
            warn!("event=ui_state_save module=tui status=error error=\"{}\"", e);
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    info!("event=tui_exit module=tui status=ok");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                TermEvent::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
