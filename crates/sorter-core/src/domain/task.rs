//! Task record: classification + free text + subtasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classification::{Complexity, Priority, Status};
use super::ids::TaskId;

pub const NEW_TASK_TITLE: &str = "New task";
pub const NEW_TASK_DESCRIPTION: &str = "Enter a description...";
pub const NEW_SUBTASK_TITLE: &str = "New subtask";

/// A line item owned by its parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub title: String,
    #[serde(default)]
    pub text: String,
}

impl SubTask {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

impl Default for SubTask {
    fn default() -> Self {
        Self::new(NEW_SUBTASK_TITLE, "")
    }
}

/// One work item on the board.
///
/// Design:
/// - `id` is assigned once at creation and is the only identity the store uses.
/// - Records are edited through an EditSession, never directly by the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    /// A record with the "new task" defaults (Pending / Medium / Simple).
    pub fn new(id: TaskId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: NEW_TASK_TITLE.to_string(),
            description: NEW_TASK_DESCRIPTION.to_string(),
            status: Status::default(),
            priority: Priority::default(),
            complexity: Complexity::default(),
            note: String::new(),
            subtasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    /// Bump `updated_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    #[test]
    fn new_task_has_defaults() {
        let now = Utc::now();
        let task = TaskRecord::new(TaskId::from_ulid(Ulid::new()), now);

        assert_eq!(task.title, NEW_TASK_TITLE);
        assert_eq!(task.status, Status::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.complexity, Complexity::Simple);
        assert!(task.subtasks.is_empty());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn deserializing_without_id_fails() {
        let json = serde_json::json!({
            "title": "no identity",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
        });
        let err = serde_json::from_value::<TaskRecord>(json).unwrap_err();
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn builders_set_classification() {
        let task = TaskRecord::new(TaskId::from_ulid(Ulid::new()), Utc::now())
            .with_status(Status::Active)
            .with_priority(Priority::High)
            .with_complexity(Complexity::Critical);

        assert_eq!(task.status, Status::Active);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.complexity, Complexity::Critical);
    }
}
