//! Register Use Case
//!
//! Creates a new account and signs the caller in.
//!
//! Order of operations: validate every field, fast-path email pre-check,
//! hash, insert (the store enforces uniqueness atomically), then issue the
//! token. A token is only ever minted for a committed record.

use std::sync::Arc;

use kernel::error::violation::{FieldViolation, Violations};

use crate::application::config::AuthConfig;
use crate::application::token::{IssuedToken, TokenIssuer};
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult, DuplicateField, EMAIL_TAKEN, USERNAME_TAKEN};

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const EMAIL_INVALID: &str = "Valid email is required";

/// Register input. Fields are optional so that absence is reported as a
/// violation instead of a decode failure.
#[derive(Debug, Default)]
pub struct RegisterInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register/login output
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub user: User,
    pub token: IssuedToken,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, issuer: Arc<TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            issuer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthOutput> {
        let (user_name, email, raw_password) = self.validate(input)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::Conflict(EMAIL_TAKEN));
        }

        let password_hash = UserPassword::hash(raw_password, self.config.pepper()).await?;

        let user = self
            .user_repo
            .insert(NewUser {
                user_name,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AuthError::DuplicateKey(DuplicateField::Email) => AuthError::Conflict(EMAIL_TAKEN),
                AuthError::DuplicateKey(DuplicateField::UserName) => {
                    AuthError::Conflict(USERNAME_TAKEN)
                }
                other => other,
            })?;

        let token = self.issuer.issue(&user.user_id)?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(AuthOutput { user, token })
    }

    /// Check all fields and report every violation at once
    fn validate(&self, input: RegisterInput) -> AuthResult<(UserName, Email, RawPassword)> {
        let mut violations = Violations::default();

        let user_name = match UserName::new(input.username.unwrap_or_default()) {
            Ok(name) => Some(name),
            Err(e) => {
                violations.push(FieldViolation::new("username", e.message().to_string()));
                None
            }
        };

        let email = input.email.and_then(|raw| Email::new(raw).ok());
        violations.check(email.is_some(), "email", EMAIL_INVALID);

        let raw_password = RawPassword::new(input.password.unwrap_or_default());
        if let Err(e) = raw_password.check_policy(&self.config.password_policy()) {
            violations.push(FieldViolation::new("password", e.to_string()));
        }

        violations.finish().map_err(AuthError::Validation)?;

        match (user_name, email) {
            (Some(user_name), Some(email)) => Ok((user_name, email, raw_password)),
            _ => Err(AuthError::Internal("validation state mismatch".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;

    fn use_case() -> (RegisterUseCase<InMemoryUserRepository>, Arc<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());
        let issuer = Arc::new(TokenIssuer::new(&config));
        (RegisterUseCase::new(repo.clone(), issuer, config), repo)
    }

    fn input(username: &str, email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let (uc, repo) = use_case();
        let out = uc.execute(input("alice", "Alice@X.com", "secret1")).await.unwrap();

        assert_eq!(out.user.user_name.as_str(), "alice");
        assert_eq!(out.user.email.as_str(), "alice@x.com");
        assert!(!out.token.token.is_empty());

        let stored = repo
            .find_by_email(&Email::new("alice@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.user.user_id, out.user.user_id);
        assert_ne!(stored.password_hash.as_phc_string(), "secret1");
    }

    #[tokio::test]
    async fn test_register_reports_every_violation() {
        let (uc, _) = use_case();
        let err = uc
            .execute(input("", "not-an-email", "123"))
            .await
            .unwrap_err();

        let AuthError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = violations.iter().map(|v| &*v.field).collect();
        assert_eq!(fields, vec!["username", "email", "password"]);
        assert_eq!(violations[0].message, USERNAME_REQUIRED);
        assert_eq!(violations[1].message, EMAIL_INVALID);
        assert_eq!(violations[2].message, "Password must be at least 6 characters");
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let (uc, _) = use_case();
        let err = uc.execute(RegisterInput::default()).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(ref v) if v.len() == 3));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (uc, repo) = use_case();
        uc.execute(input("alice", "alice@x.com", "secret1")).await.unwrap();

        let err = uc
            .execute(input("alice2", "ALICE@x.com", "secret2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(EMAIL_TAKEN)));
        assert_eq!(repo.count_by_email("alice@x.com").await, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (uc, _) = use_case();
        uc.execute(input("alice", "alice@x.com", "secret1")).await.unwrap();

        let err = uc
            .execute(input("Alice", "other@x.com", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict(USERNAME_TAKEN)));
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_registration() {
        let (uc, repo) = use_case();
        let uc = Arc::new(uc);

        let a = tokio::spawn({
            let uc = uc.clone();
            async move { uc.execute(input("alice", "race@x.com", "secret1")).await }
        });
        let b = tokio::spawn({
            let uc = uc.clone();
            async move { uc.execute(input("bob", "race@x.com", "secret1")).await }
        });

        let results = [a.await.unwrap(), b.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(AuthError::Conflict(EMAIL_TAKEN)))));
        assert_eq!(repo.count_by_email("race@x.com").await, 1);
    }
}
