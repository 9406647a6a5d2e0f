//! Current User Use Case
//!
//! Resolves a verified token subject to the stored profile.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

pub struct CurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// A valid token whose user no longer exists is treated as unauthenticated
    pub async fn execute(&self, user_id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::{
        email::Email,
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use crate::infra::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn test_resolves_stored_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let password_hash = UserPassword::hash(RawPassword::new("secret1".into()), None)
            .await
            .unwrap();
        let user = repo
            .insert(NewUser {
                user_name: UserName::new("alice").unwrap(),
                email: Email::new("alice@x.com").unwrap(),
                password_hash,
            })
            .await
            .unwrap();

        let found = CurrentUserUseCase::new(repo).execute(&user.user_id).await.unwrap();
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn test_unknown_subject_is_unauthenticated() {
        let uc = CurrentUserUseCase::new(Arc::new(InMemoryUserRepository::new()));
        let err = uc.execute(&UserId::new()).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }
}
