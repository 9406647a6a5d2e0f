//! Token Signing Secret
//!
//! The secret is loaded once at startup and handed to whoever signs or
//! verifies tokens. It is immutable for the life of the process; rotating
//! it invalidates every outstanding token.

use std::fmt;

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroizing;

/// Minimum secret length for HS256 (one SHA-256 block of key material)
pub const MIN_SECRET_LENGTH: usize = 32;

/// Prefix marking a base64-encoded secret in configuration
const BASE64_PREFIX: &str = "base64:";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("Signing secret is missing")]
    Missing,

    #[error("Signing secret must be at least {min} bytes (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Signing secret is not valid base64")]
    InvalidBase64,
}

/// HMAC signing secret
#[derive(Clone)]
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SecretError> {
        let bytes = Zeroizing::new(bytes);
        if bytes.is_empty() {
            return Err(SecretError::Missing);
        }
        if bytes.len() < MIN_SECRET_LENGTH {
            return Err(SecretError::TooShort {
                min: MIN_SECRET_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    /// Parse a configuration value
    ///
    /// `base64:<data>` is decoded; anything else is taken as raw bytes.
    pub fn from_config_value(value: &str) -> Result<Self, SecretError> {
        let value = value.trim();
        match value.strip_prefix(BASE64_PREFIX) {
            Some(encoded) => {
                let decoded = general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|_| SecretError::InvalidBase64)?;
                Self::from_bytes(decoded)
            }
            None => Self::from_bytes(value.as_bytes().to_vec()),
        }
    }

    /// Random 256-bit secret (tests and throwaway instances)
    pub fn random() -> Self {
        let mut bytes = vec![0u8; MIN_SECRET_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[REDACTED]").finish()
    }
}
