//! Interaction flow: the confirmation state machine that gates mutations.
//!
//! `Session` holds everything the UI layer used to keep as loose state. Each
//! UI event goes through [`Session::apply`], which mutates the session and
//! reports whether the task list changed so the caller can write it through
//! to the store.

use chrono::{DateTime, Utc};
use log::debug;

use crate::model::filter::Filter;
use crate::model::task::TaskList;
use crate::ops::task_ops::{self, TaskError};
use crate::ops::view::{Projection, project};

/// Modal dialog currently open
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Prompt {
    #[default]
    Idle,
    /// "Confirm Delete" for the task at this list index
    ConfirmDelete { index: usize },
    /// "Confirm Delete All"
    ConfirmDeleteAll,
    /// "Set Deadline" for a task about to be created
    SetDeadline { text: String, deadline: String },
}

/// What submitting the input line does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Create,
    /// One-shot edit of the task at this list index
    Update { index: usize },
}

/// A discrete user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Submit the input line (create or update, per input mode)
    Submit(String),
    /// Load a task into the input line for editing
    Edit(usize),
    /// Leave a pending edit without submitting it
    AbandonEdit,
    /// Ask to delete one task
    RequestDelete(usize),
    /// Ask to delete every task
    RequestDeleteAll,
    /// Replace the deadline field of the open "Set Deadline" dialog
    SetDeadlineInput(String),
    Confirm,
    Cancel,
    /// Flip one task's completion flag
    Toggle(usize),
    /// Mark or unmark every task, per the all-done flag
    ToggleAll,
    /// Mark every task done (`true`) or pending, setting the all-done flag
    MarkAll(bool),
    SetFilter(Filter),
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    /// The task list was mutated and should be persisted
    pub changed: bool,
    /// New contents for the input line, if it should change
    pub input: Option<String>,
    /// Validation failure that turned the event into a no-op
    pub rejected: Option<TaskError>,
    /// The event does not apply in the current state
    pub ignored: bool,
}

impl Outcome {
    fn changed() -> Self {
        Outcome {
            changed: true,
            ..Default::default()
        }
    }

    fn rejected(err: TaskError) -> Self {
        Outcome {
            rejected: Some(err),
            ..Default::default()
        }
    }

    fn ignored() -> Self {
        Outcome {
            ignored: true,
            ..Default::default()
        }
    }

    fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

/// Application state for one running session
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub tasks: TaskList,
    pub prompt: Prompt,
    pub input_mode: InputMode,
    pub filter: Filter,
    /// Drives "Done All" / "Undone All". Flipped on every ToggleAll and not
    /// derived from the tasks, so it can disagree with them.
    pub all_done: bool,
}

impl Session {
    pub fn new(tasks: TaskList) -> Self {
        Session {
            tasks,
            ..Default::default()
        }
    }

    /// Current filtered view
    pub fn view(&self) -> Projection<'_> {
        project(&self.tasks, self.filter)
    }

    /// Label for the bulk completion button
    pub fn toggle_all_label(&self) -> &'static str {
        if self.all_done { "Undone All" } else { "Done All" }
    }

    /// Label for the submit button
    pub fn submit_label(&self) -> &'static str {
        match self.input_mode {
            InputMode::Create => "Add Task",
            InputMode::Update { .. } => "Update",
        }
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt != Prompt::Idle
    }

    /// Apply an event, stamping new tasks with the current time.
    pub fn apply(&mut self, event: Event) -> Outcome {
        self.apply_at(event, Utc::now())
    }

    /// Apply an event with an explicit clock.
    pub fn apply_at(&mut self, event: Event, now: DateTime<Utc>) -> Outcome {
        debug!("event=flow_apply module=flow prompt={:?} input={:?}", self.prompt, event);
        let outcome = if self.is_prompting() {
            self.apply_prompting(event, now)
        } else {
            self.apply_idle(event)
        };
        if let Some(err) = &outcome.rejected {
            debug!("event=flow_rejected module=flow reason=\"{}\"", err);
        }
        outcome
    }

    fn apply_idle(&mut self, event: Event) -> Outcome {
        match event {
            Event::Submit(text) => self.submit(text),
            Event::Edit(index) => match self.tasks.get(index) {
                Some(task) => {
                    let text = task.text.clone();
                    self.input_mode = InputMode::Update { index };
                    Outcome::default().with_input(text)
                }
                None => Outcome::rejected(TaskError::IndexOutOfRange(index)),
            },
            Event::AbandonEdit => match self.input_mode {
                InputMode::Update { .. } => {
                    self.input_mode = InputMode::Create;
                    Outcome::default().with_input("")
                }
                InputMode::Create => Outcome::ignored(),
            },
            Event::RequestDelete(index) => {
                if index < self.tasks.len() {
                    self.prompt = Prompt::ConfirmDelete { index };
                    Outcome::default()
                } else {
                    Outcome::rejected(TaskError::IndexOutOfRange(index))
                }
            }
            Event::RequestDeleteAll => {
                if self.tasks.is_empty() {
                    return Outcome::ignored();
                }
                self.prompt = Prompt::ConfirmDeleteAll;
                Outcome::default()
            }
            Event::Toggle(index) => match task_ops::toggle_complete(&mut self.tasks, index) {
                Ok(_) => Outcome::changed(),
                Err(e) => Outcome::rejected(e),
            },
            Event::ToggleAll => {
                if self.tasks.is_empty() {
                    return Outcome::ignored();
                }
                let done = !self.all_done;
                self.mark_all(done)
            }
            Event::MarkAll(done) => {
                if self.tasks.is_empty() {
                    return Outcome::ignored();
                }
                self.mark_all(done)
            }
            Event::SetFilter(filter) => {
                self.filter = filter;
                Outcome::default()
            }
            Event::SetDeadlineInput(_) | Event::Confirm | Event::Cancel => Outcome::ignored(),
        }
    }

    fn submit(&mut self, text: String) -> Outcome {
        if text.trim().is_empty() {
            return Outcome::rejected(TaskError::EmptyText);
        }
        match self.input_mode {
            InputMode::Create => {
                self.prompt = Prompt::SetDeadline {
                    text,
                    deadline: String::new(),
                };
                Outcome::default()
            }
            InputMode::Update { index } => {
                match task_ops::update_task(&mut self.tasks, index, &text) {
                    Ok(()) => {
                        self.input_mode = InputMode::Create;
                        Outcome::changed().with_input("")
                    }
                    Err(e) => Outcome::rejected(e),
                }
            }
        }
    }

    fn apply_prompting(&mut self, event: Event, now: DateTime<Utc>) -> Outcome {
        match event {
            Event::Cancel => {
                self.prompt = Prompt::Idle;
                Outcome::default()
            }
            Event::SetDeadlineInput(value) => match &mut self.prompt {
                Prompt::SetDeadline { deadline, .. } => {
                    *deadline = value;
                    Outcome::default()
                }
                _ => Outcome::ignored(),
            },
            Event::Confirm => self.confirm(now),
            _ => Outcome::ignored(),
        }
    }

    fn confirm(&mut self, now: DateTime<Utc>) -> Outcome {
        match std::mem::take(&mut self.prompt) {
            Prompt::Idle => Outcome::ignored(),
            Prompt::ConfirmDelete { index } => {
                match task_ops::delete_task(&mut self.tasks, index) {
                    Ok(_) if self.shift_edit_target(index) => Outcome::changed().with_input(""),
                    Ok(_) => Outcome::changed(),
                    Err(e) => Outcome::rejected(e),
                }
            }
            Prompt::ConfirmDeleteAll => {
                task_ops::delete_all(&mut self.tasks);
                match std::mem::take(&mut self.input_mode) {
                    InputMode::Update { .. } => Outcome::changed().with_input(""),
                    InputMode::Create => Outcome::changed(),
                }
            }
            Prompt::SetDeadline { text, deadline } => {
                match task_ops::add_task(&mut self.tasks, &text, &deadline, now) {
                    Ok(_) => Outcome::changed().with_input(""),
                    Err(e) => {
                        // The dialog stays open until a usable deadline is given
                        self.prompt = Prompt::SetDeadline { text, deadline };
                        Outcome::rejected(e)
                    }
                }
            }
        }
    }

    fn mark_all(&mut self, done: bool) -> Outcome {
        task_ops::mark_all(&mut self.tasks, done);
        self.all_done = done;
        Outcome::changed()
    }

    /// Keep a pending edit pointed at the same task after a deletion.
    /// Returns true when the edited task itself was deleted.
    fn shift_edit_target(&mut self, deleted: usize) -> bool {
        let InputMode::Update { index } = self.input_mode else {
            return false;
        };
        if index == deleted {
            self.input_mode = InputMode::Create;
            return true;
        }
        if index > deleted {
            self.input_mode = InputMode::Update { index: index - 1 };
        }
        false
    }
}
