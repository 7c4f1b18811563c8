use serde::{Deserialize, Serialize};

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Stable numeric ID, unique within a list
    pub id: u32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Reminder times in epoch milliseconds
    #[serde(default)]
    pub notification_times: Vec<i64>,
}

impl TodoItem {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        TodoItem {
            id,
            title: title.into(),
            description: String::new(),
            completed: false,
            notification_times: Vec::new(),
        }
    }

    /// Earliest reminder, if any
    pub fn earliest_notification(&self) -> Option<i64> {
        self.notification_times.iter().copied().min()
    }

    pub fn section(&self) -> SectionKind {
        if self.completed {
            SectionKind::Finished
        } else {
            SectionKind::Unfinished
        }
    }
}

/// The two independently reorderable sections of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Unfinished,
    Finished,
}

impl SectionKind {
    pub fn parse(s: &str) -> Option<SectionKind> {
        match s.to_ascii_lowercase().as_str() {
            "unfinished" | "todo" | "open" => Some(SectionKind::Unfinished),
            "finished" | "done" | "completed" => Some(SectionKind::Finished),
            _ => None,
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Unfinished => write!(f, "Unfinished"),
            SectionKind::Finished => write!(f, "Finished"),
        }
    }
}
