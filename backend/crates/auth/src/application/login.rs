//! Login Use Case
//!
//! Authenticates by email and password and issues a token. An unknown email
//! and a wrong password produce the same `InvalidCredentials` error.

use std::sync::Arc;

use kernel::error::violation::Violations;
use platform::password::MAX_PASSWORD_LENGTH;

use crate::application::config::AuthConfig;
use crate::application::register::{AuthOutput, EMAIL_INVALID};
use crate::application::token::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub const PASSWORD_REQUIRED: &str = "Password is required";

/// Login input
#[derive(Debug, Default)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
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

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthOutput> {
        let mut violations = Violations::default();

        let email = input.email.and_then(|raw| Email::new(raw).ok());
        violations.check(email.is_some(), "email", EMAIL_INVALID);

        let password = input.password.unwrap_or_default();
        violations.check(!password.is_empty(), "password", PASSWORD_REQUIRED);

        violations.finish().map_err(AuthError::Validation)?;
        let email = email.ok_or(AuthError::InvalidCredentials)?;

        // registration caps the length, so nothing longer can match
        if password.chars().count() > MAX_PASSWORD_LENGTH {
            return Err(AuthError::InvalidCredentials);
        }
        let raw_password = RawPassword::new(password);

        let credentials = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !credentials
            .password_hash
            .verify(raw_password, self.config.pepper())
            .await?
        {
            return Err(AuthError::InvalidCredentials);
        }

        let user = credentials.user;
        let token = self.issuer.issue(&user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(AuthOutput { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::application::token::TokenVerifier;
    use crate::infra::memory::InMemoryUserRepository;

    struct Fixture {
        register: RegisterUseCase<InMemoryUserRepository>,
        login: LoginUseCase<InMemoryUserRepository>,
        verifier: TokenVerifier,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());
        let issuer = Arc::new(TokenIssuer::new(&config));
        Fixture {
            register: RegisterUseCase::new(repo.clone(), issuer.clone(), config.clone()),
            login: LoginUseCase::new(repo, issuer, config.clone()),
            verifier: TokenVerifier::new(&config),
        }
    }

    fn login(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    async fn register_alice(f: &Fixture) {
        f.register
            .execute(RegisterInput {
                username: Some("alice".to_string()),
                email: Some("alice@x.com".to_string()),
                password: Some("secret1".to_string()),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_login_success() {
        let f = fixture();
        register_alice(&f).await;

        let out = f.login.execute(login("ALICE@x.com", "secret1")).await.unwrap();
        assert_eq!(f.verifier.verify(&out.token.token).unwrap(), out.user.user_id);
        assert_eq!(out.user.email.as_str(), "alice@x.com");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_identical() {
        let f = fixture();
        register_alice(&f).await;

        let wrong_password = f.login.execute(login("alice@x.com", "secret2")).await.unwrap_err();
        let unknown_email = f.login.execute(login("nobody@x.com", "secret1")).await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(
            wrong_password.to_app_error().message(),
            unknown_email.to_app_error().message()
        );
        assert_eq!(wrong_password.status_code(), unknown_email.status_code());
    }

    #[tokio::test]
    async fn test_login_validation() {
        let f = fixture();
        let err = f.login.execute(LoginInput::default()).await.unwrap_err();

        let AuthError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].message, EMAIL_INVALID);
        assert_eq!(violations[1].message, PASSWORD_REQUIRED);
    }

    #[tokio::test]
    async fn test_overlong_password_is_invalid_credentials() {
        let f = fixture();
        register_alice(&f).await;

        let long = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let err = f.login.execute(login("alice@x.com", &long)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let at_limit = "a".repeat(MAX_PASSWORD_LENGTH);
        let err = f.login.execute(login("alice@x.com", &at_limit)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
