//! API error taxonomy and HTTP status mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use super::responses::ErrorResponse;
use crate::store::StoreError;

/// Errors a handler can surface to the client
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session row for the given id
    #[error("timer session not found")]
    NotFound,
    /// Malformed input, rejected before reaching storage
    #[error("{0}")]
    Validation(String),
    /// Underlying persistence failed; logged, not retried
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::Storage(err) => {
                error!("Storage failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage failure".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
