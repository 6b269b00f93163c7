use serde::Serialize;

use crate::model::{Filter, Task};
use crate::ops::view::Projection;
use crate::util::text::{format_created, format_deadline};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    /// 1-based task number, stable across filters
    pub number: usize,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub filter: Filter,
    pub tasks: Vec<TaskJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

#[derive(Serialize)]
pub struct ChangeJson {
    pub action: &'static str,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskJson>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(index: usize, task: &Task) -> TaskJson {
    TaskJson {
        number: index + 1,
        text: task.text.clone(),
        completed: task.completed,
        created_at: task.created_at.to_rfc3339(),
        deadline: task.deadline.map(|d| d.to_rfc3339()),
    }
}

pub fn projection_to_json(view: &Projection) -> TaskListJson {
    TaskListJson {
        filter: view.filter,
        tasks: view
            .entries
            .iter()
            .map(|e| task_to_json(e.index, e.task))
            .collect(),
        placeholder: view.placeholder(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary
pub fn format_task_line(index: usize, task: &Task) -> String {
    let check = if task.completed { 'x' } else { ' ' };
    let mut line = format!(
        "{:>3}. [{}] {}  ({}",
        index + 1,
        check,
        task.text,
        format_created(&task.created_at)
    );
    if let Some(deadline) = &task.deadline {
        line.push_str(", Deadline: ");
        line.push_str(&format_deadline(deadline));
    }
    line.push(')');
    line
}

/// Lines for a projected listing; the placeholder stands in for an empty view
pub fn format_listing(view: &Projection) -> Vec<String> {
    if let Some(placeholder) = view.placeholder() {
        return vec![placeholder.to_string()];
    }
    view.entries
        .iter()
        .map(|e| format_task_line(e.index, e.task))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskList;
    use crate::ops::view::project;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn list() -> TaskList {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let deadline = Utc.with_ymd_and_hms(2025, 3, 2, 18, 0, 0).unwrap();
        let mut done = Task::new("Walk dog".into(), created, None);
        done.completed = true;
        vec![Task::new("Buy milk".into(), created, Some(deadline)), done].into()
    }

    #[test]
    fn listing_numbers_follow_underlying_list() {
        let list = list();
        let lines = format_listing(&project(&list, Filter::Completed));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("  2. [x] Walk dog"));
    }

    #[test]
    fn listing_shows_deadline() {
        let list = list();
        let lines = format_listing(&project(&list, Filter::All));
        assert!(lines[0].starts_with("  1. [ ] Buy milk"));
        assert!(lines[0].contains("Deadline: 2025-03-0"));
        assert!(!lines[1].contains("Deadline"));
    }

    #[test]
    fn empty_listing_is_placeholder() {
        let list = TaskList::new();
        let lines = format_listing(&project(&list, Filter::Pending));
        assert_eq!(lines, vec!["All tasks are completed! Great job!".to_string()]);
    }

    #[test]
    fn json_uses_camel_case() {
        let list = list();
        let json = serde_json::to_value(projection_to_json(&project(&list, Filter::All))).unwrap();
        assert_eq!(json["filter"], "all");
        assert_eq!(json["tasks"][0]["number"], 1);
        assert_eq!(json["tasks"][0]["createdAt"], "2025-03-01T08:00:00+00:00");
        assert!(json["tasks"][1].get("deadline").is_none());
        assert!(json.get("placeholder").is_none());
    }
}
