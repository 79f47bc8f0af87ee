//! REST API client for the task backend.
//!
//! Wraps the task HTTP API (list, detail, create, update, delete) using
//! [`reqwest`].  The backend performs all filtering, sorting, and
//! pagination; this client ships the serialized query string as-is.

use std::time::Duration;

use taskdeck_core::response::PaginatedResponse;
use taskdeck_core::task::{CreateTaskInput, Task, UpdateTaskInput};

use crate::config::ApiConfig;

/// HTTP client for a single task API instance.
pub struct TaskApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the task REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (connect, DNS, TLS, timeout) or the
    /// response body could not be decoded.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.  `message` is the
    /// server's JSON `message` field when present, otherwise
    /// `HTTP error! status: <code>`.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Server-provided or synthesized error message.
        message: String,
    },
}

impl TaskApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:3000`.  A
    ///   trailing slash is trimmed.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across stores).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create an API client from environment-derived configuration,
    /// applying the configured request timeout.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Fetch one page of tasks.
    ///
    /// Sends `GET /tasks?<query>` with the pre-serialized query string
    /// (see `QueryState::list_query_string`).  An empty query fetches
    /// the default first page.
    pub async fn list_tasks(&self, query: &str) -> Result<PaginatedResponse<Task>, ApiError> {
        let url = if query.is_empty() {
            format!("{}/tasks", self.base_url)
        } else {
            format!("{}/tasks?{}", self.base_url, query)
        };

        let response = self.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    /// Fetch a single task by id.  Sends `GET /tasks/{id}`.
    pub async fn get_task(&self, id: &str) -> Result<Task, ApiError> {
        let response = self
            .client
            .get(format!("{}/tasks/{}", self.base_url, id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create a task.  Sends `POST /tasks`; the server assigns `id`,
    /// `createdAt`, `updatedAt`, and the default status.
    pub async fn create_task(&self, input: &CreateTaskInput) -> Result<Task, ApiError> {
        let response = self
            .client
            .post(format!("{}/tasks", self.base_url))
            .json(input)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Update a task.  Sends `PATCH /tasks/{id}` with only the supplied
    /// fields in the body.
    pub async fn update_task(&self, id: &str, input: &UpdateTaskInput) -> Result<Task, ApiError> {
        let response = self
            .client
            .patch(format!("{}/tasks/{}", self.base_url, id))
            .json(input)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Delete a task.  Sends `DELETE /tasks/{id}`; the response body is
    /// empty and discarded.
    pub async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!("{}/tasks/{}", self.base_url, id))
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.  Returns the
    /// response unchanged on success, or an [`ApiError::Http`] carrying
    /// the server's `message` field (falling back to a generic status
    /// line) on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("message")?.as_str().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
