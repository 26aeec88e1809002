//! Status Update Endpoint
//!
//! `POST /tasks/{id}/update-status/` with `{"status": "<value>"}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::csrf::CsrfSource;
use crate::config::BoardConfig;
use crate::error::SyncError;
use crate::models::{TaskId, TaskStatus};

#[derive(Debug, Serialize)]
pub struct StatusUpdateRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status_display: Option<String>,
}

/// What the server told us about an accepted update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusUpdate {
    pub message: Option<String>,
    /// Human label for the new status
    pub status_display: Option<String>,
}

/// Classify an HTTP response.
///
/// Any non-2xx status fails regardless of body. A 2xx body must be JSON with
/// `"status": "success"` to count as accepted.
pub fn interpret_response(http_status: u16, body: &str) -> Result<StatusUpdate, SyncError> {
    if !(200..300).contains(&http_status) {
        return Err(SyncError::Http { status: http_status });
    }
    let parsed: StatusResponse =
        serde_json::from_str(body).map_err(|e| SyncError::Malformed(e.to_string()))?;
    if parsed.status != "success" {
        return Err(SyncError::Rejected {
            message: parsed.message.unwrap_or_default(),
        });
    }
    Ok(StatusUpdate {
        message: parsed.message,
        status_display: parsed.status_display,
    })
}

/// Capability to persist a task's status.
#[async_trait(?Send)]
pub trait StatusClient {
    async fn set_status(&self, task: &TaskId, status: TaskStatus) -> Result<StatusUpdate, SyncError>;
}

/// `reqwest` client (fetch under wasm32).
pub struct HttpStatusClient<S> {
    http: reqwest::Client,
    config: BoardConfig,
    csrf: S,
}

impl<S: CsrfSource> HttpStatusClient<S> {
    pub fn new(config: BoardConfig, csrf: S) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            csrf,
        }
    }
}

#[async_trait(?Send)]
impl<S: CsrfSource> StatusClient for HttpStatusClient<S> {
    async fn set_status(&self, task: &TaskId, status: TaskStatus) -> Result<StatusUpdate, SyncError> {
        let token = self.csrf.token().ok_or(SyncError::MissingCsrfToken)?;
        let url = self.config.status_url(task);
        log::debug!("[api] POST {} status={}", url, status);

        let response = self
            .http
            .post(&url)
            .header(self.config.csrf_header.as_str(), token)
            .header("X-Requested-With", "XMLHttpRequest")
            .json(&StatusUpdateRequest { status })
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let code = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;
        interpret_response(code, &body)
    }
}
