// todolist - Single-user task tracker persisted as a JSON array

pub mod config;
pub mod error;
pub mod filter;
pub mod json;
pub mod menu;
pub mod models;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use error::StoreError;
pub use filter::Filter;
pub use menu::{Menu, format_task};
pub use models::{Task, TaskCollection};
pub use store::TaskStore;
