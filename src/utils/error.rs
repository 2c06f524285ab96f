//! Error Handling Utilities
//!
//! HTTP-facing error type and the JSON error body returned by every endpoint.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error type surfaced by HTTP handlers
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential authentication failures (login)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Missing, malformed, expired or wrongly-signed bearer/refresh token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Resource not found errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Conflict errors (e.g., duplicate email or phone)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Generic internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Standard error response structure for API endpoints
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

impl AppError {
    /// HTTP status and stable error code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Authentication(_) => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        let message = match self {
            AppError::Validation(msg)
            | AppError::Authentication(msg)
            | AppError::InvalidToken(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg,
            AppError::Internal(detail) => {
                log::error!("Internal error: {}", detail);
                "An internal server error occurred".to_string()
            }
        };

        let error_response = ErrorResponse::new(error_code, &message);
        (status, Json(error_response)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Result type alias for operations that can return AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_creation() {
        let error = ErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.error, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
    }

    #[test]
    fn test_error_body_has_only_error_and_message() {
        let body = serde_json::to_value(ErrorResponse::new("CONFLICT", "email in use")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "CONFLICT", "message": "email in use"})
        );
    }

    #[test]
    fn test_app_error_display() {
        let error = AppError::Validation("Invalid email".to_string());
        assert_eq!(error.to_string(), "Validation error: Invalid email");
    }

    #[test]
    fn test_unauthorized_kinds_stay_distinct() {
        let login = AppError::Authentication("invalid email or password".into());
        let token = AppError::InvalidToken("invalid token".into());

        assert_eq!(login.status_and_code().0, StatusCode::UNAUTHORIZED);
        assert_eq!(token.status_and_code().0, StatusCode::UNAUTHORIZED);
        assert_ne!(login.status_and_code().1, token.status_and_code().1);
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let response = AppError::Internal("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
