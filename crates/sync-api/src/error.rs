//! Error types for the sync API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use thiserror::Error;

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Database(DatabaseError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Database(DatabaseError::AlreadyExists { .. })
            | ApiError::Database(DatabaseError::DuplicateExternalId { .. }) => StatusCode::CONFLICT,
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
