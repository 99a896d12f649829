//! Taskpad - terminal client for a todo backend with an AI assistant.
//!
//! Without a subcommand the interactive TUI starts. The remaining
//! subcommands perform a single operation and print the result, which is
//! handy for scripting and for checking a backend from a shell.
//!
//! # Environment Variables
//!
//! See the [`config`](taskpad_client::config) module for available
//! configuration options.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use taskpad_client::api::{AssistantApi, TaskApi};
use taskpad_client::assistant::{AiAction, AssistantState};
use taskpad_client::config::Config;
use taskpad_client::task_list::{TaskList, TaskTitles};
use taskpad_client::tui;
use taskpad_client::types::{Task, TaskId};

/// Log file written while the TUI owns the terminal.
const LOG_FILE_NAME: &str = "taskpad.log";

/// Taskpad - todo list client with an AI assistant.
#[derive(Parser, Debug)]
#[command(name = "taskpad")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    TASKPAD_TASKS_URL             Task backend URL (default: http://localhost:8081/api/todos)
    TASKPAD_AI_URL                AI backend URL (default: http://localhost:8081/api/ai)
    TASKPAD_REQUEST_TIMEOUT_SECS  Per-request timeout (default: none)
    TASKPAD_LOG_DIR               TUI log directory (default: ~/.taskpad)
    RUST_LOG                      Log filter (default: info)

EXAMPLES:
    # Start the interactive client
    taskpad

    # Add a task from the shell
    taskpad add \"Buy milk\" -d \"2 liters\"

    # Ask the assistant a question
    taskpad ask \"What's pending?\"
")]
struct Cli {
    /// Task backend base URL (overrides TASKPAD_TASKS_URL).
    #[arg(long, global = true)]
    tasks_url: Option<String>,

    /// AI backend base URL (overrides TASKPAD_AI_URL).
    #[arg(long, global = true)]
    ai_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive terminal UI (default).
    Tui,

    /// Print all tasks.
    List,

    /// Create a task.
    Add {
        /// Task title.
        title: String,

        /// Optional description.
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Flip a task between pending and completed.
    Toggle {
        /// Task id as shown by `list`.
        id: TaskId,
    },

    /// Delete a task.
    Remove {
        /// Task id as shown by `list`.
        id: TaskId,
    },

    /// Print an AI summary of the task list.
    Summarize,

    /// Ask the assistant a free-form question.
    Ask {
        /// The question.
        question: String,
    },

    /// Print an AI category for every task.
    Categorize,

    /// Print an AI priority for every task.
    Prioritize,

    /// Print AI recommendations.
    Recommend,

    /// Check whether the AI service is reachable.
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = &cli.tasks_url {
        config = config.with_tasks_url(url).context("Invalid --tasks-url")?;
    }
    if let Some(url) = &cli.ai_url {
        config = config.with_ai_url(url).context("Invalid --ai-url")?;
    }

    let command = cli.command.unwrap_or(Command::Tui);
    if matches!(command, Command::Tui) {
        init_file_logging(&config.log_dir)?;
        tui::run(&config).await.context("TUI failed")?;
        return Ok(ExitCode::SUCCESS);
    }

    init_logging();
    debug!(?command, tasks_url = %config.tasks_url, ai_url = %config.ai_url, "Running command");

    let ok = match command {
        Command::Tui => true,
        Command::List => run_list(&config).await?,
        Command::Add { title, description } => run_add(&config, &title, &description).await?,
        Command::Toggle { id } => run_toggle(&config, &id).await?,
        Command::Remove { id } => run_remove(&config, &id).await?,
        Command::Summarize => run_assistant(&config, AiAction::Summarize, None).await?,
        Command::Ask { question } => run_assistant(&config, AiAction::Ask, Some(question)).await?,
        Command::Categorize => run_assistant(&config, AiAction::Categorize, None).await?,
        Command::Prioritize => run_assistant(&config, AiAction::Prioritize, None).await?,
        Command::Recommend => run_assistant(&config, AiAction::Recommend, None).await?,
        Command::Health => run_health(&config).await?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn task_api(config: &Config) -> Result<TaskApi> {
    TaskApi::new(&config.tasks_url, config.request_timeout).context("Failed to create HTTP client")
}

fn assistant_api(config: &Config) -> Result<AssistantApi> {
    AssistantApi::new(&config.ai_url, config.request_timeout)
        .context("Failed to create HTTP client")
}

/// Loads the task list, printing the error on failure.
async fn load_tasks(api: &TaskApi) -> Option<TaskList> {
    let mut list = TaskList::new();
    if list.load(api).await {
        Some(list)
    } else {
        report_task_error(&list);
        None
    }
}

fn report_task_error(list: &TaskList) {
    if let Some(error) = list.error() {
        eprintln!("Error: {error}");
    }
}

fn print_task(task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    println!("[{mark}] {:>4}  {}", task.id.to_string(), task.title);
    if let Some(description) = task.visible_description() {
        println!("          {description}");
    }
}

async fn run_list(config: &Config) -> Result<bool> {
    let api = task_api(config)?;
    let Some(list) = load_tasks(&api).await else {
        return Ok(false);
    };

    if list.is_empty() {
        println!("No tasks yet.");
    }
    for task in list.tasks() {
        print_task(task);
    }
    println!(
        "{} pending, {} done",
        list.pending_count(),
        list.completed_count()
    );
    Ok(true)
}

async fn run_add(config: &Config, title: &str, description: &str) -> Result<bool> {
    let api = task_api(config)?;
    let mut list = TaskList::new();

    if list.begin_add(title, description).is_none() {
        eprintln!("Error: title must not be empty");
        return Ok(false);
    }
    if !list.add(&api, title, description).await {
        report_task_error(&list);
        return Ok(false);
    }
    if let Some(task) = list.tasks().first() {
        info!(id = %task.id, "Task created");
        print_task(task);
    }
    Ok(true)
}

async fn run_toggle(config: &Config, id: &TaskId) -> Result<bool> {
    let api = task_api(config)?;
    let Some(mut list) = load_tasks(&api).await else {
        return Ok(false);
    };

    if list.get(id).is_none() {
        eprintln!("Error: no task with id {id}");
        return Ok(false);
    }
    if !list.toggle(&api, id).await {
        report_task_error(&list);
        return Ok(false);
    }
    if let Some(task) = list.get(id) {
        print_task(task);
    }
    Ok(true)
}

async fn run_remove(config: &Config, id: &TaskId) -> Result<bool> {
    let api = task_api(config)?;
    let Some(mut list) = load_tasks(&api).await else {
        return Ok(false);
    };
    let title = list.get(id).map(|task| task.title.clone());

    if !list.remove(&api, id).await {
        report_task_error(&list);
        return Ok(false);
    }
    match title {
        Some(title) => println!("Deleted task {id}: {title}"),
        None => println!("Deleted task {id}"),
    }
    Ok(true)
}

async fn run_assistant(config: &Config, action: AiAction, question: Option<String>) -> Result<bool> {
    let ai = assistant_api(config)?;
    let mut state = AssistantState::new();
    if let Some(question) = question {
        state.set_question(question);
    }

    // Titles only label analysis items; without them items read "Unknown Task".
    let titles = if action.analysis_kind().is_some() {
        TaskTitles::fetch(&task_api(config)?).await
    } else {
        TaskTitles::default()
    };

    let Some(request) = state.begin(action) else {
        eprintln!("Error: question must not be empty");
        return Ok(false);
    };
    let outcome = request.execute(&ai).await;
    let failed = outcome.error().is_some();
    state.apply(outcome);

    let lines = state.result_lines(action, &titles);
    if lines.is_empty() && !failed {
        println!("No results.");
    }
    for line in lines {
        println!("{line}");
    }
    Ok(!failed)
}

async fn run_health(config: &Config) -> Result<bool> {
    let ai = assistant_api(config)?;
    match ai.health().await {
        Ok(status) => {
            println!("{}", status.trim());
            Ok(true)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(false)
        }
    }
}

/// Initializes stderr logging for one-shot commands.
///
/// Log level is controlled by the `RUST_LOG` environment variable.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

/// Initializes logging to `<log_dir>/taskpad.log` so output does not
/// corrupt the TUI.
fn init_file_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .init();
    Ok(())
}
