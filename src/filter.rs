// Predicates for selecting tasks

use crate::models::Task;

/// Filter for querying tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Title contains the text, ignoring case; empty text matches everything
    TitleContains(String),
    /// Priority label equals the text, ignoring case
    Priority(String),
    Completed(bool),
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::TitleContains(query) => task.title.to_lowercase().contains(&query.to_lowercase()),
            Filter::Priority(priority) => task.priority.to_lowercase() == priority.to_lowercase(),
            Filter::Completed(completed) => task.completed == *completed,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::TitleContains(query) => write!(f, "title contains {:?}", query),
            Filter::Priority(priority) => write!(f, "priority = {}", priority),
            Filter::Completed(completed) => write!(f, "completed = {}", completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, priority: &str, completed: bool) -> Task {
        Task {
            title: title.to_string(),
            priority: priority.to_string(),
            completed,
        }
    }

    #[test]
    fn test_title_contains_ignores_case() {
        let t = task("Buy milk", "High", false);
        assert!(Filter::TitleContains("MILK".to_string()).matches(&t));
        assert!(Filter::TitleContains("buy".to_string()).matches(&t));
        assert!(!Filter::TitleContains("bread".to_string()).matches(&t));
    }

    #[test]
    fn test_empty_title_query_matches_everything() {
        assert!(Filter::TitleContains(String::new()).matches(&task("anything", "Low", true)));
        assert!(Filter::TitleContains(String::new()).matches(&task("", "", false)));
    }

    #[test]
    fn test_priority_and_completed() {
        let t = task("Pay rent", "High", true);
        assert!(Filter::Priority("high".to_string()).matches(&t));
        assert!(!Filter::Priority("Low".to_string()).matches(&t));
        assert!(Filter::Completed(true).matches(&t));
        assert!(!Filter::Completed(false).matches(&t));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(Filter::Completed(false).to_string(), "completed = false");
        assert_eq!(Filter::Priority("Low".to_string()).to_string(), "priority = Low");
    }
}
