//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::sync::Arc;
use std::time::Duration;

use platform::password::{DEFAULT_MIN_PASSWORD_LENGTH, PasswordPolicy};
use platform::secret::SigningSecret;

use crate::error::{AuthError, AuthResult};

/// Default token lifetime (one day)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret shared by issuer and verifier
    pub token_secret: SigningSecret,
    /// Token lifetime
    pub token_ttl: Duration,
    /// Minimum password length at registration
    pub password_min_length: usize,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Arc<[u8]>>,
}

impl AuthConfig {
    pub fn new(token_secret: SigningSecret) -> Self {
        Self {
            token_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
            password_min_length: DEFAULT_MIN_PASSWORD_LENGTH,
            password_pepper: None,
        }
    }

    /// Create config with a random signing secret (for development and tests)
    pub fn with_random_secret() -> Self {
        Self::new(SigningSecret::random())
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_pepper(mut self, pepper: impl AsRef<[u8]>) -> Self {
        self.password_pepper = Some(Arc::from(pepper.as_ref()));
        self
    }

    /// Get password pepper as a shareable handle
    pub fn pepper(&self) -> Option<Arc<[u8]>> {
        self.password_pepper.clone()
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            min_length: self.password_min_length,
        }
    }

    /// Token lifetime as a chrono duration. Zero or more than
    /// [`MAX_TOKEN_TTL`] is a configuration error.
    pub fn token_ttl_chrono(&self) -> AuthResult<chrono::Duration> {
        if self.token_ttl.is_zero() || self.token_ttl > MAX_TOKEN_TTL {
            return Err(AuthError::Signing(format!(
                "token TTL must be between 1s and {}s, got {}s",
                MAX_TOKEN_TTL.as_secs(),
                self.token_ttl.as_secs()
            )));
        }
        chrono::Duration::from_std(self.token_ttl)
            .map_err(|e| AuthError::Signing(format!("token TTL out of range: {e}")))
    }

    /// Check the settings that would otherwise only fail at signing time
    pub fn validate(&self) -> AuthResult<()> {
        self.token_ttl_chrono().map(|_| ())
    }
}
