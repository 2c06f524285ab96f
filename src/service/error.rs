//! Service Errors
//!
//! Error type shared by the authentication and customer services, and its
//! mapping onto HTTP errors.

use thiserror::Error;

use crate::database::{StoreError, UniqueField};
use crate::service::jwt::TokenError;
use crate::utils::{error::AppError, security::PasswordTaskError};

/// Stable error classification used for logging and HTTP mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    Unauthorized,
    NotFound,
    Validation,
    Internal,
}

/// Custom error types for the customer services
#[derive(Error, Debug)]
pub enum CustomerServiceError {
    /// Another customer already registered this email
    #[error("email in use")]
    EmailInUse,

    /// Another customer already uses this phone number
    #[error("phone in use")]
    PhoneInUse,

    /// Unknown email or wrong password; the two are deliberately identical
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Refresh or access token rejected for any reason
    #[error("invalid token")]
    InvalidToken,

    /// No customer with the requested id
    #[error("customer not found")]
    CustomerNotFound,

    #[error("new password and confirmation do not match")]
    PasswordConfirmationMismatch,

    #[error("current password incorrect")]
    IncorrectCurrentPassword,

    /// Input validation failed with detailed error message
    #[error("{0}")]
    ValidationError(String),

    /// Credential store failure
    #[error("Store error: {0}")]
    Store(StoreError),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    PasswordHashing(#[from] PasswordTaskError),

    /// Token could not be signed
    #[error("Token issuing error: {0}")]
    TokenIssue(TokenError),
}

impl CustomerServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmailInUse | Self::PhoneInUse => ErrorKind::Conflict,
            Self::InvalidCredentials | Self::InvalidToken => ErrorKind::Unauthorized,
            Self::CustomerNotFound => ErrorKind::NotFound,
            Self::PasswordConfirmationMismatch
            | Self::IncorrectCurrentPassword
            | Self::ValidationError(_) => ErrorKind::Validation,
            Self::Store(_) | Self::PasswordHashing(_) | Self::TokenIssue(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for CustomerServiceError {
    /// Unique violations reported by the store become the same conflicts the
    /// pre-checks produce
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(UniqueField::Email) => Self::EmailInUse,
            StoreError::Duplicate(UniqueField::Phone) => Self::PhoneInUse,
            other => Self::Store(other),
        }
    }
}

impl From<CustomerServiceError> for AppError {
    fn from(err: CustomerServiceError) -> Self {
        let message = err.to_string();
        match err {
            CustomerServiceError::EmailInUse | CustomerServiceError::PhoneInUse => {
                AppError::Conflict(message)
            }
            CustomerServiceError::InvalidCredentials => AppError::Authentication(message),
            CustomerServiceError::InvalidToken => AppError::InvalidToken(message),
            CustomerServiceError::CustomerNotFound => AppError::NotFound(message),
            CustomerServiceError::PasswordConfirmationMismatch
            | CustomerServiceError::IncorrectCurrentPassword
            | CustomerServiceError::ValidationError(_) => AppError::Validation(message),
            CustomerServiceError::Store(_)
            | CustomerServiceError::PasswordHashing(_)
            | CustomerServiceError::TokenIssue(_) => AppError::Internal(message),
        }
    }
}

/// Result type for customer service operations
pub type CustomerServiceResult<T> = Result<T, CustomerServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_store_duplicates_translate_to_conflicts() {
        let email: CustomerServiceError = StoreError::Duplicate(UniqueField::Email).into();
        let phone: CustomerServiceError = StoreError::Duplicate(UniqueField::Phone).into();

        assert!(matches!(email, CustomerServiceError::EmailInUse));
        assert!(matches!(phone, CustomerServiceError::PhoneInUse));
        assert_eq!(email.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_unauthorized_errors_differ_in_variant_not_kind() {
        assert_eq!(
            CustomerServiceError::InvalidCredentials.kind(),
            CustomerServiceError::InvalidToken.kind()
        );
        assert_eq!(
            CustomerServiceError::InvalidCredentials.to_string(),
            "invalid email or password"
        );
        assert_eq!(CustomerServiceError::InvalidToken.to_string(), "invalid token");
    }

    #[test]
    fn test_http_mapping() {
        let cases = [
            (CustomerServiceError::EmailInUse, StatusCode::CONFLICT),
            (CustomerServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (CustomerServiceError::InvalidToken, StatusCode::UNAUTHORIZED),
            (CustomerServiceError::CustomerNotFound, StatusCode::NOT_FOUND),
            (
                CustomerServiceError::PasswordConfirmationMismatch,
                StatusCode::BAD_REQUEST,
            ),
            (
                CustomerServiceError::IncorrectCurrentPassword,
                StatusCode::BAD_REQUEST,
            ),
            (
                CustomerServiceError::TokenIssue(TokenError::Signing("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let app_error: AppError = err.into();
            assert_eq!(app_error.status_and_code().0, status);
        }
    }
}
