//! Error conversions
//!
//! Unique-violation inspection for `sqlx` errors and the HTTP rendering of
//! [`AppError`].

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// SQLx helpers (feature-gated)
// ============================================================================

/// SQLSTATE for `unique_violation`
#[cfg(feature = "sqlx")]
pub const UNIQUE_VIOLATION: &str = "23505";

/// Name of the unique constraint a database error violated, if any
///
/// Adapters use this to tell *which* key collided so the caller can say
/// "Email already in use" rather than a generic message.
#[cfg(feature = "sqlx")]
pub fn unique_violation_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Some(db_err.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let mut body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
        });

        if !self.violations().is_empty() {
            body["errors"] = serde_json::json!(self.violations());
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "sqlx")]
    #[test]
    fn test_non_database_errors_have_no_constraint() {
        use super::unique_violation_constraint;

        assert!(unique_violation_constraint(&sqlx::Error::PoolTimedOut).is_none());
        assert!(unique_violation_constraint(&sqlx::Error::RowNotFound).is_none());
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_status() {
        use crate::error::app_error::AppError;
        use crate::error::violation::FieldViolation;
        use axum::response::IntoResponse;

        let response = AppError::bad_request("Validation failed")
            .with_violations(vec![FieldViolation::new("email", "Valid email is required")])
            .into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
