//! Blog Error Types
//!
//! Blog-specific error variants on top of `kernel::error::AppError`.
//! Authentication and ownership failures are carried as [`AuthError`] and
//! rendered exactly as the auth crate renders them.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind, violation::FieldViolation};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

pub const POST_NOT_FOUND: &str = "Post not found";
pub const CATEGORY_EXISTS: &str = "Category already exists";

#[derive(Debug, Error)]
pub enum BlogError {
    /// Request body failed shape validation (every violated field)
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("{0}")]
    NotFound(&'static str),

    /// Referenced category does not exist
    #[error("Invalid category")]
    InvalidCategory,

    #[error("{0}")]
    Conflict(&'static str),

    /// Store-level uniqueness violation on category name
    #[error("Duplicate category name")]
    DuplicateKey,

    /// Missing identity or not the owner
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::Validation(_)
            | BlogError::InvalidCategory
            | BlogError::Conflict(_)
            | BlogError::DuplicateKey => ErrorKind::BadRequest,
            BlogError::NotFound(_) => ErrorKind::NotFound,
            BlogError::Auth(e) => e.kind(),
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            BlogError::Auth(e) => e.to_app_error(),
            BlogError::Validation(violations) => {
                AppError::new(self.kind(), self.to_string()).with_violations(violations.clone())
            }
            BlogError::DuplicateKey => AppError::new(self.kind(), CATEGORY_EXISTS),
            BlogError::Database(_) | BlogError::Internal(_) => {
                AppError::new(self.kind(), "Server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        match self {
            // Auth errors log at their own levels
            BlogError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}
