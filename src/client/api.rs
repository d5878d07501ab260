//! Remote timer API boundary
//!
//! `TimerApi` is the capability a timer consumer composes against; the HTTP
//! implementation talks to the tickdown server, tests substitute in-memory
//! fakes.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::api::responses::TimerStateView;
use crate::store::TimerSession;

/// Errors from the remote timer API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or decode failure, the trigger for local fallback
    #[error("request failed: {0}")]
    Transport(String),
    /// Server answered with an unexpected status
    #[error("unexpected response status: {0}")]
    Status(u16),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Remote operations a timer consumer needs
///
/// Not-found is an `Ok(None)` result, never an error; only transport-level
/// problems surface as `ClientError`.
#[async_trait]
pub trait TimerApi: Send + Sync {
    async fn create(&self, duration_seconds: i64) -> Result<TimerSession, ClientError>;
    async fn get_state(&self, id: i64) -> Result<Option<TimerStateView>, ClientError>;
    async fn start(&self, id: i64) -> Result<Option<TimerSession>, ClientError>;
    async fn stop(&self, id: i64) -> Result<Option<TimerSession>, ClientError>;
    async fn reset(&self, id: i64) -> Result<Option<TimerSession>, ClientError>;
}

/// HTTP implementation of [`TimerApi`]
pub struct HttpTimerApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTimerApi {
    /// Create a client against a server base URL, e.g. `http://127.0.0.1:2022`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn session_from(
        response: reqwest::Response,
    ) -> Result<Option<TimerSession>, ClientError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl TimerApi for HttpTimerApi {
    async fn create(&self, duration_seconds: i64) -> Result<TimerSession, ClientError> {
        let response = self
            .http
            .post(self.url("/sessions"))
            .json(&json!({ "duration_seconds": duration_seconds }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn get_state(&self, id: i64) -> Result<Option<TimerStateView>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/sessions/{}/state", id)))
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        Ok(Some(response.json().await?))
    }

    async fn start(&self, id: i64) -> Result<Option<TimerSession>, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/sessions/{}/start", id)))
            .send()
            .await?;
        Self::session_from(response).await
    }

    async fn stop(&self, id: i64) -> Result<Option<TimerSession>, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/sessions/{}/stop", id)))
            .send()
            .await?;
        Self::session_from(response).await
    }

    async fn reset(&self, id: i64) -> Result<Option<TimerSession>, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/sessions/{}/reset", id)))
            .send()
            .await?;
        Self::session_from(response).await
    }
}
