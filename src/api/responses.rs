//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::TimerSession;

/// Timer state view with the display-ready countdown string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerStateView {
    pub id: i64,
    pub duration_seconds: i64,
    pub remaining_seconds: i64,
    pub is_running: bool,
    pub is_completed: bool,
    /// MM:SS rendering of `remaining_seconds`
    pub formatted_time: String,
}

impl From<&TimerSession> for TimerStateView {
    fn from(session: &TimerSession) -> Self {
        Self {
            id: session.id,
            duration_seconds: session.duration_seconds,
            remaining_seconds: session.remaining_seconds,
            is_running: session.is_running,
            is_completed: session.is_completed,
            formatted_time: session.formatted_time(),
        }
    }
}

/// JSON body attached to error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
