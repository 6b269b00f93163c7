use serde::{Deserialize, Serialize};

/// Which subset of the task list is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    /// Tab order
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    /// Whether a task with the given completion flag belongs in this view
    pub fn matches(self, completed: bool) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !completed,
            Filter::Completed => completed,
        }
    }

    /// Tab label
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All Tasks",
            Filter::Pending => "Pending Tasks",
            Filter::Completed => "Completed Tasks",
        }
    }

    /// Message shown when the view is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            Filter::All => "No tasks available. Add a new task!",
            Filter::Pending => "All tasks are completed! Great job!",
            Filter::Completed => "No completed tasks yet. Keep working!",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }

    /// Next tab, wrapping
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    /// Previous tab, wrapping
    pub fn prev(self) -> Filter {
        match self {
            Filter::All => Filter::Completed,
            Filter::Pending => Filter::All,
            Filter::Completed => Filter::Pending,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "pending" => Ok(Filter::Pending),
            "completed" | "done" => Ok(Filter::Completed),
            _ => Err(format!(
                "unknown filter '{}' (expected: all, pending, completed)",
                s
            )),
        }
    }
}
