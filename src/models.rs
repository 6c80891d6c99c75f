// Data models for the task list

use serde::{Deserialize, Serialize};

/// A single to-do item
///
/// Tasks carry no durable identifier. Their position in the
/// [`TaskCollection`] is the only handle a caller has, and it shifts
/// whenever an earlier task is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub title: String,
    /// Free-form label, conventionally "High", "Medium" or "Low"
    pub priority: String,
    pub completed: bool,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(title: impl Into<String>, priority: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: priority.into(),
            completed: false,
        }
    }
}

/// The full ordered task list, the unit of persistence
pub type TaskCollection = Vec<Task>;
