//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::info;

use super::error::ApiError;
use super::responses::{HealthResponse, TimerStateView};
use crate::state::AppState;
use crate::store::{SessionPatch, TimerSession};

/// Body for POST /sessions
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionInput {
    /// Total countdown length; falls back to the configured default
    pub duration_seconds: Option<i64>,
}

/// Body for PATCH /sessions/:id
#[derive(Debug, Deserialize)]
pub struct UpdateSessionInput {
    pub remaining_seconds: Option<i64>,
    pub is_running: Option<bool>,
    pub is_completed: Option<bool>,
}

/// Handle POST /sessions - create a timer session
///
/// An empty body falls back to the configured default duration; a non-empty
/// body that fails to parse is rejected rather than silently defaulted.
pub async fn create_session_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<TimerSession>), ApiError> {
    let input: CreateSessionInput = if body.is_empty() {
        CreateSessionInput::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Validation(format!("invalid request body: {}", e)))?
    };
    let duration = input
        .duration_seconds
        .unwrap_or(state.default_duration_seconds);
    if duration <= 0 {
        return Err(ApiError::Validation(format!(
            "duration_seconds must be positive, got {}",
            duration
        )));
    }

    let session = state.store.insert(duration)?;
    info!("Created timer session {} ({}s)", session.id, duration);
    Ok((StatusCode::CREATED, Json(session)))
}

/// Handle GET /sessions/:id - fetch a timer session
pub async fn get_session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TimerSession>, ApiError> {
    let session = state.store.find_by_id(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(session))
}

/// Handle PATCH /sessions/:id - partial update of the mutable fields
///
/// When the patch drives `remaining_seconds` to zero the session is forced
/// completed and not running; any other combination is written as supplied.
pub async fn update_session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateSessionInput>,
) -> Result<Json<TimerSession>, ApiError> {
    if let Some(remaining) = input.remaining_seconds {
        if remaining < 0 {
            return Err(ApiError::Validation(format!(
                "remaining_seconds must be non-negative, got {}",
                remaining
            )));
        }
    }

    let mut patch = SessionPatch {
        remaining_seconds: input.remaining_seconds,
        is_running: input.is_running,
        is_completed: input.is_completed,
    };
    if patch.remaining_seconds == Some(0) {
        patch.is_running = Some(false);
        patch.is_completed = Some(true);
    }

    let session = state
        .store
        .update_fields(id, &patch)?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(session))
}

/// Handle POST /sessions/:id/start - begin (or resume) the countdown
pub async fn start_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TimerSession>, ApiError> {
    let patch = SessionPatch {
        is_running: Some(true),
        ..SessionPatch::default()
    };
    let session = state
        .store
        .update_fields(id, &patch)?
        .ok_or(ApiError::NotFound)?;
    info!("Started timer session {}", id);
    Ok(Json(session))
}

/// Handle POST /sessions/:id/stop - pause the countdown, idempotent
pub async fn stop_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TimerSession>, ApiError> {
    let patch = SessionPatch {
        is_running: Some(false),
        ..SessionPatch::default()
    };
    let session = state
        .store
        .update_fields(id, &patch)?
        .ok_or(ApiError::NotFound)?;
    info!("Stopped timer session {}", id);
    Ok(Json(session))
}

/// Handle POST /sessions/:id/reset - restore the full duration
///
/// Resets regardless of current state: remaining goes back to the original
/// duration and both flags clear.
pub async fn reset_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TimerSession>, ApiError> {
    let existing = state.store.find_by_id(id)?.ok_or(ApiError::NotFound)?;
    let patch = SessionPatch {
        remaining_seconds: Some(existing.duration_seconds),
        is_running: Some(false),
        is_completed: Some(false),
    };
    let session = state
        .store
        .update_fields(id, &patch)?
        .ok_or(ApiError::NotFound)?;
    info!("Reset timer session {}", id);
    Ok(Json(session))
}

/// Handle GET /sessions/:id/state - session plus the MM:SS display string
pub async fn get_state_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TimerStateView>, ApiError> {
    let session = state.store.find_by_id(id)?.ok_or(ApiError::NotFound)?;
    Ok(Json(TimerStateView::from(&session)))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
