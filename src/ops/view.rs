use crate::model::filter::Filter;
use crate::model::task::{Task, TaskList};

/// One row of a projected view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewEntry<'a> {
    /// Position in the underlying list; mutations from the view use this
    pub index: usize,
    pub task: &'a Task,
}

/// Read-only filtered view of a task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub filter: Filter,
    pub entries: Vec<ViewEntry<'a>>,
}

impl<'a> Projection<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Placeholder text, present only when the view is empty
    pub fn placeholder(&self) -> Option<&'static str> {
        self.entries
            .is_empty()
            .then(|| self.filter.placeholder())
    }

    /// Underlying list index for a view position
    pub fn underlying_index(&self, view_pos: usize) -> Option<usize> {
        self.entries.get(view_pos).map(|e| e.index)
    }
}

/// Project a task list through a filter, preserving list order.
pub fn project(list: &TaskList, filter: Filter) -> Projection<'_> {
    let entries = list
        .iter()
        .enumerate()
        .filter(|(_, task)| filter.matches(task.completed))
        .map(|(index, task)| ViewEntry { index, task })
        .collect();
    Projection { filter, entries }
}
