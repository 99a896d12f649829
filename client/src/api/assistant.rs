//! Client for the AI assistant backend.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use super::{build_client, check_status, ApiError};
use crate::types::{AiAnswer, AnalysisItem, AnalysisKind, AnalysisRecord, QuestionRequest};

/// REST client for the read-only AI endpoints under `{base}`.
#[derive(Debug, Clone)]
pub struct AssistantApi {
    base_url: String,
    client: Client,
}

impl AssistantApi {
    /// Creates a client for the AI backend rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Requests a free-text summary across all tasks.
    pub async fn summarize(&self) -> Result<AiAnswer, ApiError> {
        let url = self.url("summarize");
        debug!(url = %url, "Requesting summary");
        let response = self.client.get(&url).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Asks a free-form question about the tasks.
    pub async fn ask(&self, question: &str) -> Result<AiAnswer, ApiError> {
        let url = self.url("question");
        debug!(url = %url, "Asking question");
        let body = QuestionRequest {
            question: question.to_string(),
        };
        let response = self.client.post(&url).json(&body).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// Requests a full re-analysis of one kind over all tasks.
    pub async fn analyze(&self, kind: AnalysisKind) -> Result<Vec<AnalysisItem>, ApiError> {
        let url = self.url(kind.endpoint());
        debug!(url = %url, ?kind, "Requesting analysis");
        let response = self.client.get(&url).send().await?;
        let records: Vec<AnalysisRecord> = check_status(response).await?.json().await?;
        info!(?kind, count = records.len(), "Analysis received");
        Ok(records.into_iter().map(|r| r.into_item(kind)).collect())
    }

    /// Checks the AI service health endpoint, returning its status text.
    pub async fn health(&self) -> Result<String, ApiError> {
        let url = self.url("health");
        debug!(url = %url, "Checking AI service health");
        let response = self.client.get(&url).send().await?;
        Ok(check_status(response).await?.text().await?)
    }
}
