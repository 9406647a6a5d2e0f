//! User Name Value Object
//!
//! Display handle chosen at registration. Any printable text is accepted;
//! uniqueness is decided on the canonical form (NFKC, lowercased), so
//! `Alice` and `alice` cannot both exist.
//!
//! ## Invariants
//! - Non-empty after trimming
//! - At most [`USER_NAME_MAX_LENGTH`] characters
//! - No control characters

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 50;

/// User name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new user name with validation
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let original = normalized.trim().to_string();

        if original.is_empty() {
            return Err(AppError::bad_request("Username is required"));
        }

        if original.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        if original.chars().any(char::is_control) {
            return Err(AppError::bad_request("Username contains invalid characters"));
        }

        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Restore from database columns (assumed already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// As entered (trimmed, normalized)
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Form used for uniqueness
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
