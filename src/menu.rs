// Interactive text menu over a TaskStore

use crate::error::StoreError;
use crate::models::Task;
use crate::store::TaskStore;
use colored::Colorize;
use eyre::Result;
use std::io::{BufRead, Write};
use tracing::warn;

const MENU: &str = "\n--- To-Do List App ---
1. Add Task
2. View Tasks
3. Complete Task
4. Delete Task
5. Search Tasks
6. Exit";

/// Render one task line, `number` is the 1-based display position
pub fn format_task(number: usize, task: &Task) -> String {
    let status = if task.completed { "✔".green() } else { "✘".red() };
    format!(
        "{}. {} - Priority: {} - Completed: {}",
        number, task.title, task.priority, status
    )
}

/// Blocking menu loop reading choices from `input` and writing to `output`
pub struct Menu<'a, R, W> {
    store: &'a TaskStore,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a TaskStore, input: R, output: W) -> Self {
        Self { store, input, output }
    }

    /// Run until the user picks Exit or input ends
    ///
    /// Store errors are reported and the loop continues. Only failures to
    /// read input or write output end the loop with an error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                writeln!(self.output)?;
                return Ok(());
            };

            match choice.trim() {
                "1" => self.add()?,
                "2" => self.view()?,
                "3" => self.complete()?,
                "4" => self.delete()?,
                "5" => self.search()?,
                "6" => {
                    writeln!(self.output, "Exiting the app. Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn add(&mut self) -> Result<()> {
        let title = self.prompt("Enter task title: ")?.unwrap_or_default();
        let title = title.trim();
        if title.is_empty() {
            writeln!(self.output, "Task title cannot be empty.")?;
            return Ok(());
        }
        let priority = self.prompt("Enter task priority (High/Medium/Low): ")?.unwrap_or_default();

        match self.store.add(title, priority.trim()) {
            Ok(task) => writeln!(self.output, "Task '{}' added successfully.", task.title)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn view(&mut self) -> Result<()> {
        let tasks = match self.store.load() {
            Ok(tasks) => tasks,
            Err(e) => return self.report(e),
        };
        if tasks.is_empty() {
            writeln!(self.output, "No tasks found.")?;
            return Ok(());
        }

        writeln!(self.output, "\nCurrent Tasks:")?;
        for (i, task) in tasks.iter().enumerate() {
            writeln!(self.output, "{}", format_task(i + 1, task))?;
        }
        Ok(())
    }

    fn complete(&mut self) -> Result<()> {
        let Some(index) = self.prompt_index("Enter task number to mark as completed: ")? else {
            return Ok(());
        };
        match self.store.complete(index) {
            Ok(task) => writeln!(self.output, "Task '{}' marked as completed.", task.title)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let Some(index) = self.prompt_index("Enter task number to delete: ")? else {
            return Ok(());
        };
        match self.store.delete(index) {
            Ok(task) => writeln!(self.output, "Task '{}' deleted successfully.", task.title)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let query = self.prompt("Enter search query: ")?.unwrap_or_default();
        let results: Vec<Task> = match self.store.search(query.trim()) {
            Ok(results) => results.collect(),
            Err(e) => return self.report(e),
        };
        if results.is_empty() {
            writeln!(self.output, "No tasks found matching your search.")?;
            return Ok(());
        }

        writeln!(self.output, "\nSearch Results:")?;
        for (i, task) in results.iter().enumerate() {
            writeln!(self.output, "{}", format_task(i + 1, task))?;
        }
        Ok(())
    }

    /// Prompt for a 1-based task number and convert it to an index
    ///
    /// Returns `None` after reporting bad input.
    fn prompt_index(&mut self, message: &str) -> Result<Option<usize>> {
        let answer = self.prompt(message)?.unwrap_or_default();
        match answer.trim().parse::<i64>() {
            Ok(number) if number >= 1 => Ok(usize::try_from(number - 1).ok()),
            Ok(_) => {
                writeln!(self.output, "Invalid task number.")?;
                Ok(None)
            }
            Err(_) => {
                writeln!(self.output, "Invalid input. Please enter a valid number.")?;
                Ok(None)
            }
        }
    }

    /// Write `message` and read one line; `None` at end of input
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn report(&mut self, err: StoreError) -> Result<()> {
        match err {
            StoreError::IndexOutOfRange { .. } => writeln!(self.output, "Invalid task number.")?,
            e => {
                warn!(error = %e, "Task store operation failed");
                writeln!(self.output, "An error occurred: {}", e)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_menu(store: &TaskStore, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(store, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn open(temp: &TempDir) -> TaskStore {
        TaskStore::new(temp.path().join("tasks.json"))
    }

    #[test]
    fn test_format_task() {
        let line = format_task(3, &Task::new("Buy milk", "High"));
        assert!(line.starts_with("3. Buy milk - Priority: High - Completed: "));
        assert!(line.contains('✘'));
    }

    #[test]
    fn test_add_then_view() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);

        let out = run_menu(&store, "1\nBuy milk\nHigh\n2\n6\n");
        assert!(out.contains("Task 'Buy milk' added successfully."));
        assert!(out.contains("Current Tasks:"));
        assert!(out.contains("1. Buy milk - Priority: High - Completed: "));
        assert!(out.contains("Exiting the app. Goodbye!"));

        assert_eq!(store.load().unwrap(), vec![Task::new("Buy milk", "High")]);
    }

    #[test]
    fn test_view_empty() {
        let temp = TempDir::new().unwrap();
        let out = run_menu(&open(&temp), "2\n6\n");
        assert!(out.contains("No tasks found."));
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);

        let out = run_menu(&store, "1\n   \n6\n");
        assert!(out.contains("Task title cannot be empty."));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_complete_and_delete_use_one_based_numbers() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);
        store.add("Buy milk", "High").unwrap();
        store.add("Walk dog", "Low").unwrap();

        let out = run_menu(&store, "3\n2\n4\n1\n6\n");
        assert!(out.contains("Task 'Walk dog' marked as completed."));
        assert!(out.contains("Task 'Buy milk' deleted successfully."));

        let tasks = store.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Walk dog");
        assert!(tasks[0].completed);
    }

    #[test]
    fn test_bad_numbers_are_recoverable() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);
        store.add("Buy milk", "High").unwrap();

        let out = run_menu(&store, "3\nabc\n3\n0\n4\n7\n2\n6\n");
        assert!(out.contains("Invalid input. Please enter a valid number."));
        assert_eq!(out.matches("Invalid task number.").count(), 2);
        assert!(out.contains("1. Buy milk"));
        assert!(!store.load().unwrap()[0].completed);
    }

    #[test]
    fn test_search() {
        let temp = TempDir::new().unwrap();
        let store = open(&temp);
        store.add("Walk dog", "Low").unwrap();
        store.add("Buy milk", "High").unwrap();

        let out = run_menu(&store, "5\nMILK\n5\nbread\n6\n");
        assert!(out.contains("Search Results:"));
        assert!(out.contains("1. Buy milk"));
        assert!(!out.contains("Walk dog - Priority"));
        assert!(out.contains("No tasks found matching your search."));
    }

    #[test]
    fn test_invalid_choice_and_end_of_input() {
        let temp = TempDir::new().unwrap();
        let out = run_menu(&open(&temp), "9\n");
        assert!(out.contains("Invalid choice. Please try again."));
        assert!(!out.contains("Goodbye"));
    }

    #[test]
    fn test_storage_error_does_not_end_loop() {
        let temp = TempDir::new().unwrap();
        // Directory in place of the task file
        let store = TaskStore::new(temp.path());

        let out = run_menu(&store, "1\nBuy milk\nHigh\n6\n");
        assert!(out.contains("An error occurred:"));
        assert!(out.contains("Exiting the app. Goodbye!"));
    }
}
