//! Task list view model.
//!
//! Owns the client-side copy of the task collection. Every mutation goes
//! through the backend and the cache adopts whatever the server returns;
//! the client never computes `completed` or `createdAt` itself.
//!
//! Operations are split in three steps so the UI loop can keep ownership of
//! the state while requests run elsewhere:
//!
//! 1. `begin_*` validates input and returns a [`TaskRequest`] (or `None`
//!    when nothing should be sent)
//! 2. [`TaskRequest::execute`] performs the HTTP call and yields a
//!    [`TaskOutcome`]
//! 3. [`TaskList::apply`] folds the outcome into the state
//!
//! The async helpers ([`TaskList::load`], [`TaskList::add`], ...) run all
//! three steps inline, for the command line and tests.
//!
//! # Example
//!
//! ```no_run
//! use taskpad_client::api::TaskApi;
//! use taskpad_client::task_list::TaskList;
//!
//! # async fn example() {
//! let api = TaskApi::new("http://localhost:8081/api/todos", None).unwrap();
//! let mut list = TaskList::new();
//! list.load(&api).await;
//! list.add(&api, "Buy milk", "").await;
//! # }
//! ```

use std::collections::HashMap;

use tracing::warn;

use crate::api::{ApiError, TaskApi};
use crate::types::{NewTask, Task, TaskId};

/// Error shown when the collection cannot be fetched.
pub const FETCH_FAILED: &str = "Failed to fetch tasks";

/// Error shown when a task cannot be created.
pub const ADD_FAILED: &str = "Failed to add task";

/// Error shown when a task cannot be updated.
pub const UPDATE_FAILED: &str = "Failed to update task";

/// Error shown when a task cannot be deleted.
pub const DELETE_FAILED: &str = "Failed to delete task";

/// Placeholder title for analysis items whose task is not in the snapshot.
pub const UNKNOWN_TASK: &str = "Unknown Task";

/// A request the task list wants sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskRequest {
    /// Fetch the whole collection.
    Load,
    /// Create a new task.
    Create(NewTask),
    /// Replace a task with the given full record.
    Update { id: TaskId, task: Task },
    /// Delete a task.
    Delete(TaskId),
}

impl TaskRequest {
    /// Sends the request and wraps the response in a [`TaskOutcome`].
    pub async fn execute(self, api: &TaskApi) -> TaskOutcome {
        match self {
            TaskRequest::Load => TaskOutcome::Loaded(api.list().await),
            TaskRequest::Create(new_task) => TaskOutcome::Created(api.create(&new_task).await),
            TaskRequest::Update { id, task } => TaskOutcome::Updated {
                result: api.update(&task).await,
                id,
            },
            TaskRequest::Delete(id) => {
                let result = api.delete(&id).await;
                TaskOutcome::Deleted { id, result }
            }
        }
    }
}

/// Result of a [`TaskRequest`], ready to be applied to a [`TaskList`].
#[derive(Debug)]
pub enum TaskOutcome {
    Loaded(Result<Vec<Task>, ApiError>),
    Created(Result<Task, ApiError>),
    Updated {
        id: TaskId,
        result: Result<Task, ApiError>,
    },
    Deleted {
        id: TaskId,
        result: Result<(), ApiError>,
    },
}

/// Read-only `id -> title` projection of the task list.
///
/// Handed to the assistant view as an immutable snapshot so it can label
/// analysis items without holding on to the list itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTitles(HashMap<TaskId, String>);

impl TaskTitles {
    /// Builds a snapshot. If an id appears twice, the first title wins.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut titles = HashMap::with_capacity(tasks.len());
        for task in tasks {
            titles
                .entry(task.id.clone())
                .or_insert_with(|| task.title.clone());
        }
        Self(titles)
    }

    /// Loads a fresh snapshot from `api`.
    ///
    /// A failed load yields an empty snapshot, so every id reads as
    /// [`UNKNOWN_TASK`]; callers labelling analysis items carry on either way.
    pub async fn fetch(api: &TaskApi) -> Self {
        let mut list = TaskList::new();
        if !list.load(api).await {
            warn!("Task titles unavailable, labelling items as unknown");
        }
        list.titles()
    }

    /// Returns the title for `id`, or [`UNKNOWN_TASK`].
    #[must_use]
    pub fn title_for(&self, id: &TaskId) -> &str {
        self.0.get(id).map_or(UNKNOWN_TASK, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Cached task collection plus its user-visible error and loading flag.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    error: Option<String>,
    loading: bool,
}

impl TaskList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks in display order, newest-created first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Current user-visible error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns `true` while a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet completed.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.len() - self.pending_count()
    }

    /// Snapshot of task titles for the assistant view.
    #[must_use]
    pub fn titles(&self) -> TaskTitles {
        TaskTitles::from_tasks(&self.tasks)
    }

    /// Starts a load: sets the loading flag and clears any previous error.
    pub fn begin_load(&mut self) -> TaskRequest {
        self.loading = true;
        self.error = None;
        TaskRequest::Load
    }

    /// Starts an add. Returns `None`, leaving state untouched, when the title
    /// is empty or whitespace.
    #[must_use]
    pub fn begin_add(&self, title: &str, description: &str) -> Option<TaskRequest> {
        NewTask::new(title, description).map(TaskRequest::Create)
    }

    /// Starts a toggle of the cached record with `id`. Returns `None` if the
    /// id is not in the cache.
    #[must_use]
    pub fn begin_toggle(&self, id: &TaskId) -> Option<TaskRequest> {
        self.get(id).map(|task| TaskRequest::Update {
            id: id.clone(),
            task: task.toggled(),
        })
    }

    /// Starts a delete of `id`.
    #[must_use]
    pub fn begin_remove(&self, id: &TaskId) -> TaskRequest {
        TaskRequest::Delete(id.clone())
    }

    /// Applies a request outcome to the cache.
    ///
    /// Success adopts the server's data; failure sets the matching error
    /// message and leaves the cache unchanged. Returns `true` on success.
    pub fn apply(&mut self, outcome: TaskOutcome) -> bool {
        match outcome {
            TaskOutcome::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(tasks) => {
                        self.tasks = tasks;
                        true
                    }
                    Err(e) => self.fail(FETCH_FAILED, &e),
                }
            }
            TaskOutcome::Created(result) => match result {
                Ok(task) => {
                    self.tasks.insert(0, task);
                    true
                }
                Err(e) => self.fail(ADD_FAILED, &e),
            },
            TaskOutcome::Updated { id, result } => match result {
                Ok(updated) => {
                    if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
                        *slot = updated;
                    }
                    true
                }
                Err(e) => self.fail(UPDATE_FAILED, &e),
            },
            TaskOutcome::Deleted { id, result } => match result {
                Ok(()) => {
                    self.tasks.retain(|t| t.id != id);
                    true
                }
                Err(e) => self.fail(DELETE_FAILED, &e),
            },
        }
    }

    fn fail(&mut self, message: &str, error: &ApiError) -> bool {
        warn!(error = %error, "{message}");
        self.error = Some(message.to_string());
        false
    }

    /// Executes `request` against `api` and applies the outcome.
    pub async fn run(&mut self, request: TaskRequest, api: &TaskApi) -> bool {
        let outcome = request.execute(api).await;
        self.apply(outcome)
    }

    /// Fetches the full collection and replaces the cache.
    pub async fn load(&mut self, api: &TaskApi) -> bool {
        let request = self.begin_load();
        self.run(request, api).await
    }

    /// Creates a task and prepends the server's record. Blank titles are
    /// rejected locally and return `false` without a request.
    pub async fn add(&mut self, api: &TaskApi, title: &str, description: &str) -> bool {
        match self.begin_add(title, description) {
            Some(request) => self.run(request, api).await,
            None => false,
        }
    }

    /// Inverts `completed` on the server and adopts the returned record.
    /// Unknown ids return `false` without a request.
    pub async fn toggle(&mut self, api: &TaskApi, id: &TaskId) -> bool {
        match self.begin_toggle(id) {
            Some(request) => self.run(request, api).await,
            None => false,
        }
    }

    /// Deletes a task and drops it from the cache.
    pub async fn remove(&mut self, api: &TaskApi, id: &TaskId) -> bool {
        let request = self.begin_remove(id);
        self.run(request, api).await
    }
}
