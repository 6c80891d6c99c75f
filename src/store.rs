// Task store backed by a single JSON file

use crate::error::{Result, StoreError};
use crate::filter::Filter;
use crate::json;
use crate::models::{Task, TaskCollection};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Persistent task list stored as a JSON array at a fixed path
///
/// Every operation reads the whole file and every mutation writes the whole
/// file back. Only one process may use a given path at a time.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Create a store for the given file path
    ///
    /// Nothing is read or created until the first operation.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path of the task file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full task collection
    ///
    /// A missing or unreadable-as-JSON file yields an empty collection.
    pub fn load(&self) -> Result<TaskCollection> {
        json::read_json_array(&self.path)
    }

    /// Overwrite the task file with `tasks`
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        json::write_json_array(&self.path, tasks)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new task and return it
    pub fn add(&self, title: &str, priority: &str) -> Result<Task> {
        let mut tasks = self.load()?;
        let task = Task::new(title, priority);
        tasks.push(task.clone());
        self.save(&tasks)?;

        info!(title, priority, position = tasks.len() - 1, "Task added");
        Ok(task)
    }

    /// Mark the task at `index` as completed and return it
    pub fn complete(&self, index: usize) -> Result<Task> {
        let mut tasks = self.load()?;
        let len = tasks.len();
        let task = tasks.get_mut(index).ok_or(StoreError::IndexOutOfRange { index, len })?;
        task.completed = true;
        let task = task.clone();
        self.save(&tasks)?;

        info!(index, title = %task.title, "Task completed");
        Ok(task)
    }

    /// Remove the task at `index` and return it
    ///
    /// Every later task moves up one position.
    pub fn delete(&self, index: usize) -> Result<Task> {
        let mut tasks = self.load()?;
        let len = tasks.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        let task = tasks.remove(index);
        self.save(&tasks)?;

        info!(index, title = %task.title, "Task deleted");
        Ok(task)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Tasks whose title contains `query`, ignoring case, in stored order
    pub fn search(&self, query: &str) -> Result<impl Iterator<Item = Task> + use<>> {
        let filter = Filter::TitleContains(query.to_string());
        let tasks = self.load()?;
        debug!(query, count = tasks.len(), "Searching tasks");
        Ok(tasks.into_iter().filter(move |task| filter.matches(task)))
    }

    /// Tasks matching every filter, paired with their 0-based position
    pub fn list(&self, filters: &[Filter]) -> Result<Vec<(usize, Task)>> {
        let tasks = self.load()?;
        debug!(
            filters = %filters.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
            count = tasks.len(),
            "Listing tasks"
        );

        Ok(tasks
            .into_iter()
            .enumerate()
            .filter(|(_, task)| filters.iter().all(|f| f.matches(task)))
            .collect())
    }
}
