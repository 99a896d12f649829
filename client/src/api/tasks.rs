//! Client for the task-storage backend.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{debug, info};

use super::{build_client, check_status, ApiError};
use crate::types::{NewTask, Task, TaskId};

/// REST client for `GET/POST {base}` and `PUT/DELETE {base}/{id}`.
///
/// Ids are sent as a single percent-encoded path segment, so a text id
/// containing `/`, `?` or `#` still addresses its own record.
#[derive(Debug, Clone)]
pub struct TaskApi {
    base_url: Url,
    client: Client,
}

impl TaskApi {
    /// Creates a client for the task backend rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` is not an absolute URL
    /// with a path, or `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let trimmed = base_url.trim_end_matches('/');
        let invalid = |message: String| ApiError::InvalidUrl {
            url: trimmed.to_string(),
            message,
        };
        let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }

        Ok(Self {
            base_url: url,
            client: build_client(timeout)?,
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn item_url(&self, id: &TaskId) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base always has path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    /// Fetches the full task collection.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        debug!(url = %self.base_url, "Fetching tasks");
        let response = self.client.get(self.base_url.clone()).send().await?;
        let tasks: Vec<Task> = check_status(response).await?.json().await?;
        info!(count = tasks.len(), "Tasks fetched");
        Ok(tasks)
    }

    /// Creates a task and returns the server's record.
    pub async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        debug!(url = %self.base_url, title = %task.title, "Creating task");
        let response = self
            .client
            .post(self.base_url.clone())
            .json(task)
            .send()
            .await?;
        let created: Task = check_status(response).await?.json().await?;
        info!(id = %created.id, "Task created");
        Ok(created)
    }

    /// Sends a full task record and returns the server's updated record.
    pub async fn update(&self, task: &Task) -> Result<Task, ApiError> {
        let url = self.item_url(&task.id);
        debug!(url = %url, completed = task.completed, "Updating task");
        let response = self.client.put(url).json(task).send().await?;
        let updated: Task = check_status(response).await?.json().await?;
        info!(id = %updated.id, completed = updated.completed, "Task updated");
        Ok(updated)
    }

    /// Deletes a task.
    pub async fn delete(&self, id: &TaskId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        debug!(url = %url, "Deleting task");
        let response = self.client.delete(url).send().await?;
        check_status(response).await?;
        info!(id = %id, "Task deleted");
        Ok(())
    }
}
