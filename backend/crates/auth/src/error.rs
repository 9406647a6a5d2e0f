//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind, violation::FieldViolation};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

pub const EMAIL_TAKEN: &str = "Email already in use";
pub const USERNAME_TAKEN: &str = "Username already in use";

/// Unique key that a store insert collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    UserName,
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body failed shape validation (every violated field)
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Store-level uniqueness violation
    #[error("Duplicate key: {0:?}")]
    DuplicateKey(DuplicateField),

    /// Registration collided with an existing account
    #[error("{0}")]
    Conflict(&'static str),

    /// Unknown email or wrong password; the two are never distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired bearer token
    #[error("Authentication required")]
    Unauthenticated,

    /// Identity resolved but not the resource owner
    #[error("Not authorized")]
    Forbidden,

    /// Token signing failed
    #[error("Token signing failed: {0}")]
    Signing(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::DuplicateKey(_)
            | AuthError::Conflict(_)
            | AuthError::InvalidCredentials => ErrorKind::BadRequest,
            AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Signing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Message safe to show a client. Infrastructure detail stays in logs.
    fn public_message(&self) -> String {
        match self {
            AuthError::DuplicateKey(DuplicateField::Email) => EMAIL_TAKEN.to_string(),
            AuthError::DuplicateKey(DuplicateField::UserName) => USERNAME_TAKEN.to_string(),
            AuthError::Signing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                "Server error".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let app_error = AppError::new(self.kind(), self.public_message());
        match self {
            AuthError::Validation(violations) => app_error.with_violations(violations.clone()),
            _ => app_error,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Signing(msg) => {
                tracing::error!(message = %msg, "Token signing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Forbidden => {
                tracing::warn!("Mutation denied to non-owner");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::Validation(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::Conflict(EMAIL_TAKEN).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::Signing("bad key".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_are_opaque() {
        let err = AuthError::Internal("connection to 10.0.0.3 refused".into());
        assert_eq!(err.to_app_error().message(), "Server error");

        let err = AuthError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_app_error().message(), "Server error");
    }

    #[test]
    fn test_validation_carries_violations() {
        let err = AuthError::Validation(vec![
            FieldViolation::new("email", "Valid email is required"),
            FieldViolation::new("password", "Password is required"),
        ]);
        let app = err.to_app_error();
        assert_eq!(app.violations().len(), 2);
        assert_eq!(app.message(), "Validation failed");
    }

    #[test]
    fn test_duplicate_key_messages() {
        assert_eq!(
            AuthError::DuplicateKey(DuplicateField::Email).to_app_error().message(),
            EMAIL_TAKEN
        );
        assert_eq!(
            AuthError::DuplicateKey(DuplicateField::UserName).to_app_error().message(),
            USERNAME_TAKEN
        );
    }
}
