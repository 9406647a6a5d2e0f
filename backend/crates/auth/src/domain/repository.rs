//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::user::{NewUser, User, UserCredentials};
use crate::domain::value_object::{UserId, email::Email};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and assign its id
    ///
    /// The uniqueness check and the write are one atomic step: of two
    /// concurrent inserts with the same email, exactly one succeeds and the
    /// other fails with `AuthError::DuplicateKey`.
    async fn insert(&self, user: NewUser) -> AuthResult<User>;

    /// Find user and password hash by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserCredentials>>;

    /// Find user by id
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Check if email is registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}
