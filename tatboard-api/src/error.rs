/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which automatically converts
/// to the appropriate HTTP status code and the shared response envelope:
///
/// ```json
/// { "success": false, "message": "Project not found" }
/// ```
///
/// Expected conditions (missing field, not-found, duplicate, bad
/// credentials) are detected explicitly in the handlers and short-circuit
/// with a precise status; anything unexpected from the database or the
/// password hasher degrades to a 500 whose body never carries the raw
/// error text (the detail is logged server-side).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tatboard_shared::auth::password::PasswordError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) - missing/malformed/out-of-range input
    BadRequest(String),

    /// Unauthorized (401) - login only
    Unauthorized(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - duplicate email
    Conflict(String),

    /// Unacknowledged write (500) - the store accepted the request but
    /// did not acknowledge the insert; carries a fixed client-visible
    /// message, distinct from a thrown driver error
    WriteUnacknowledged(String),

    /// Internal server error (500) - generic body, detail logged only
    InternalError(String),
}

/// Error response body, the failure half of the shared envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::WriteUnacknowledged(msg) => write!(f, "Write unacknowledged: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::WriteUnacknowledged(msg) => {
                tracing::error!("Unacknowledged write: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
        });

        (status, body).into_response()
    }
}

/// Convert MongoDB driver errors to API errors
impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::InternalError(format!("Database error: {}", err))
    }
}

/// Convert password hashing errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid project ID format".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid project ID format");

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_status_code_mapping() {
        let cases = vec![
            (
                ApiError::BadRequest("x".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Unauthorized("x".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
            (ApiError::Conflict("x".to_string()), StatusCode::CONFLICT),
            (
                ApiError::WriteUnacknowledged("x".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::InternalError("x".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_error_body_is_generic() {
        let response = ApiError::InternalError("connection refused to 10.0.0.5".to_string())
            .into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();

        assert!(!body.success);
        assert_eq!(body.message, "Internal server error");
    }

    #[tokio::test]
    async fn test_unacknowledged_write_keeps_its_message() {
        let response =
            ApiError::WriteUnacknowledged("Failed to create project".to_string()).into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body.message, "Failed to create project");
    }
}
