use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task label (never empty after trimming)
    #[serde(alias = "task")]
    pub text: String,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Set once at creation
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Optional deadline, fixed at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a pending task
    pub fn new(text: String, created_at: DateTime<Utc>, deadline: Option<DateTime<Utc>>) -> Self {
        Task {
            text,
            completed: false,
            created_at,
            deadline,
        }
    }
}

/// Ordered task collection. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Count of completed tasks
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        TaskList { tasks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_camel_case_and_omits_missing_deadline() {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let task = Task::new("Buy milk".into(), created, None);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["text"], "Buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2025-01-01T09:00:00Z");
        assert!(json.get("deadline").is_none());
    }

    #[test]
    fn accepts_legacy_field_names() {
        let raw = r#"[{"task":"Old","completed":true,"timestamp":"2024-03-01T12:00:00.000Z","deadline":"2024-03-02T08:30:00.000Z"}]"#;
        let list: TaskList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.len(), 1);
        let task = list.get(0).unwrap();
        assert_eq!(task.text, "Old");
        assert!(task.completed);
        assert_eq!(
            task.deadline,
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn list_is_a_plain_json_array() {
        let list = TaskList::new();
        assert_eq!(serde_json::to_string(&list).unwrap(), "[]");
    }
}
