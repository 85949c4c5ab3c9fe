//! API error types with IntoResponse
//!
//! Errors are converted to responses with appropriate status codes:
//! 400 validation, 404 not found (empty body), 409 duplicate name,
//! 500 for everything the store throws at us.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;
use crate::services::ServiceError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: i64 },

    /// Name collision (409)
    Conflict { message: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "validation_error",
                    "message": e.to_string()
                })),
            )
                .into_response(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id, "not found");
                StatusCode::NOT_FOUND.into_response()
            }
            Self::Conflict { message } => {
                (StatusCode::CONFLICT, Json(json!({ "message": message }))).into_response()
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound { resource, id } => Self::NotFound { resource, id },
            dup @ ServiceError::DuplicateName { .. } => Self::Conflict {
                message: dup.to_string(),
            },
            ServiceError::Database(e) => Self::Database(e),
        }
    }
}
