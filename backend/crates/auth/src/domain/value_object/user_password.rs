//! User Password Value Object
//!
//! Domain wrappers around `platform::password`. Argon2id is deliberately
//! slow, so hashing and verification run on the blocking thread pool
//! instead of stalling the async executor.
//!
//! ## Usage
//! ```rust,ignore
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("secret1".to_string());
//! let hashed = UserPassword::hash(raw, None).await?;
//!
//! let attempt = RawPassword::new("secret1".to_string());
//! assert!(hashed.verify(attempt, None).await?);
//! ```

use std::fmt;
use std::sync::Arc;

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordPolicy, PasswordPolicyError,
};

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check length policy for new passwords
    pub fn check_policy(&self, policy: &PasswordPolicy) -> Result<(), PasswordPolicyError> {
        policy.check(&self.0)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Stored Hash)
// ============================================================================

/// Stored password hash (PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with a fresh salt
    pub async fn hash(raw: RawPassword, pepper: Option<Arc<[u8]>>) -> AuthResult<Self> {
        let hashed = tokio::task::spawn_blocking(move || raw.0.hash(pepper.as_deref()))
            .await?
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(Self(hashed))
    }

    /// Verify a raw password against this hash. Never errors on mismatch.
    pub async fn verify(&self, raw: RawPassword, pepper: Option<Arc<[u8]>>) -> AuthResult<bool> {
        let hashed = self.0.clone();
        let ok = tokio::task::spawn_blocking(move || hashed.verify(&raw.0, pepper.as_deref()))
            .await?;
        Ok(ok)
    }

    /// Restore from a stored PHC string
    pub fn from_db(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
