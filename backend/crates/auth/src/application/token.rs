//! Bearer Tokens
//!
//! HS256-signed JWTs carrying `{ sub, iat, exp }`. Nothing is persisted:
//! a token is valid iff its signature matches the configured secret and
//! the current time is strictly before `exp`.
//!
//! Expiry is checked here against an explicit clock rather than by
//! `jsonwebtoken`, so the boundary (`now >= exp` fails, no leeway) is exact
//! and testable.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Freshly minted token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Issuer
// ============================================================================

/// Token issuer
///
/// An out-of-range lifetime surfaces as `AuthError::Signing` from `issue`,
/// never as a panic.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Option<Duration>,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            ttl: config.token_ttl_chrono().ok(),
        }
    }

    /// Issue a token for `user_id`, valid from now for the configured window
    pub fn issue(&self, user_id: &UserId) -> AuthResult<IssuedToken> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: &UserId, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let expires_at = self
            .ttl
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::Signing("token expiry out of range".to_string()))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}

// ============================================================================
// Verifier
// ============================================================================

/// Token verifier
///
/// Every failure (bad signature, expired, malformed, foreign algorithm,
/// unparseable subject) is reported as `AuthError::Unauthenticated`.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return its subject
    pub fn verify(&self, token: &str) -> AuthResult<UserId> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<UserId> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::Unauthenticated
        })?;

        if now.timestamp() >= data.claims.exp {
            tracing::debug!(exp = data.claims.exp, "Token expired");
            return Err(AuthError::Unauthenticated);
        }

        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::secret::SigningSecret;

    fn config() -> AuthConfig {
        AuthConfig::with_random_secret()
    }

    #[test]
    fn test_issue_then_verify() {
        let config = config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);
        let user_id = UserId::new();

        let issued = issuer.issue(&user_id).unwrap();
        assert_eq!(verifier.verify(&issued.token).unwrap(), user_id);
    }

    #[test]
    fn test_expiry_window() {
        let config = config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);
        let user_id = UserId::new();
        let t0 = Utc::now();

        let issued = issuer.issue_at(&user_id, t0).unwrap();
        assert_eq!(issued.expires_at, t0 + Duration::hours(24));

        let just_before = t0 + Duration::hours(24) - Duration::seconds(1);
        assert!(verifier.verify_at(&issued.token, just_before).is_ok());

        let at_expiry = t0 + Duration::hours(24);
        assert!(matches!(
            verifier.verify_at(&issued.token, at_expiry),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_custom_ttl() {
        let config = config().with_token_ttl(std::time::Duration::from_secs(60));
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);
        let t0 = Utc::now();

        let issued = issuer.issue_at(&UserId::new(), t0).unwrap();
        assert!(verifier.verify_at(&issued.token, t0 + Duration::seconds(59)).is_ok());
        assert!(verifier.verify_at(&issued.token, t0 + Duration::seconds(60)).is_err());
    }

    #[test]
    fn test_out_of_range_ttl_fails_instead_of_panicking() {
        let huge = config().with_token_ttl(std::time::Duration::from_secs(7_200_000_000_000_000));
        let err = TokenIssuer::new(&huge).issue(&UserId::new()).unwrap_err();
        assert!(matches!(err, AuthError::Signing(_)));

        let issuer = TokenIssuer::new(&config());
        assert!(matches!(
            issuer.issue_at(&UserId::new(), DateTime::<Utc>::MAX_UTC),
            Err(AuthError::Signing(_))
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issuer = TokenIssuer::new(&config());
        let verifier = TokenVerifier::new(&config());

        let issued = issuer.issue(&UserId::new()).unwrap();
        assert!(matches!(
            verifier.verify(&issued.token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let config = config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);

        let issued = issuer.issue(&UserId::new()).unwrap();
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let other = issuer.issue(&UserId::new()).unwrap();
        let other_payload = other.token.split('.').nth(1).unwrap().to_string();
        parts[1] = &other_payload;
        let forged = parts.join(".");

        assert!(verifier.verify(&forged).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let verifier = TokenVerifier::new(&config());
        assert!(verifier.verify("").is_err());
        assert!(verifier.verify("not-a-token").is_err());
        assert!(verifier.verify("a.b.c").is_err());
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let secret = SigningSecret::from_bytes(vec![9u8; 32]).unwrap();
        let config = AuthConfig::new(secret);
        let claims = Claims {
            sub: "42".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(&[9u8; 32]),
        )
        .unwrap();

        assert!(TokenVerifier::new(&config).verify(&token).is_err());
    }
}
