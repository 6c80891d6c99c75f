use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result, eyre};
use std::io;
use std::path::PathBuf;
use todolist::{Config, Filter, Menu, TaskStore, format_task};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "A command-line to-do list stored as JSON")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the task file (overrides the config file)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to the config file (default: <config dir>/todolist/todolist.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "todolist=debug" (overrides the config file)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        title: String,

        /// Priority label (High/Medium/Low)
        #[arg(short, long, default_value = "Medium")]
        priority: String,
    },

    /// List tasks
    List(ListArgs),

    /// Mark a task as completed
    Complete {
        /// Task number as shown by `list`
        number: usize,
    },

    /// Delete a task
    Delete {
        /// Task number as shown by `list`
        number: usize,
    },

    /// Search task titles (case-insensitive)
    Search { query: String },

    /// Run the interactive menu
    Menu,
}

#[derive(Args)]
struct ListArgs {
    /// Only tasks not yet completed
    #[arg(long, conflicts_with = "done")]
    pending: bool,

    /// Only completed tasks
    #[arg(long)]
    done: bool,

    /// Only tasks with this priority
    #[arg(short, long)]
    priority: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_tracing(cli.log_level.as_deref().unwrap_or(config.log_level.as_str()))?;

    let tasks_file = cli.file.unwrap_or(config.tasks_file);
    let store = TaskStore::new(&tasks_file);
    tracing::debug!(file = ?store.path(), "Using task file");

    match cli.command {
        None | Some(Commands::Menu) => {
            let stdin = io::stdin();
            Menu::new(&store, stdin.lock(), io::stdout()).run()?;
        }
        Some(Commands::Add { title, priority }) => {
            if title.trim().is_empty() {
                return Err(eyre!("Task title cannot be empty"));
            }
            let task = store.add(title.trim(), priority.trim())?;
            println!("Task '{}' added successfully.", task.title);
        }
        Some(Commands::List(args)) => {
            let mut filters = Vec::new();
            if args.pending {
                filters.push(Filter::Completed(false));
            }
            if args.done {
                filters.push(Filter::Completed(true));
            }
            if let Some(priority) = args.priority {
                filters.push(Filter::Priority(priority));
            }

            let tasks = store.list(&filters)?;
            if tasks.is_empty() {
                println!("No tasks found.");
            }
            for (index, task) in tasks {
                println!("{}", format_task(index + 1, &task));
            }
        }
        Some(Commands::Complete { number }) => {
            let task = store
                .complete(to_index(number)?)
                .wrap_err_with(|| format!("Failed to complete task {}", number))?;
            println!("Task '{}' marked as completed.", task.title);
        }
        Some(Commands::Delete { number }) => {
            let task = store
                .delete(to_index(number)?)
                .wrap_err_with(|| format!("Failed to delete task {}", number))?;
            println!("Task '{}' deleted successfully.", task.title);
        }
        Some(Commands::Search { query }) => {
            let mut found = false;
            for (i, task) in store.search(&query)?.enumerate() {
                found = true;
                println!("{}", format_task(i + 1, &task));
            }
            if !found {
                println!("No tasks found matching your search.");
            }
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| eyre!("{}", err))
        .context("Failed to initialize tracing subscriber")?;
    Ok(())
}

/// Convert a 1-based task number to an index
fn to_index(number: usize) -> Result<usize> {
    number.checked_sub(1).ok_or_else(|| eyre!("Invalid task number: {}", number))
}
