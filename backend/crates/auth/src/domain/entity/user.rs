//! User Entity
//!
//! Public profile of a registered account. The password hash is kept in
//! [`UserCredentials`] and never travels with a plain `User`.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    UserId, email::Email, user_name::UserName, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Assigned by the store at insert time
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// User together with the stored hash, for credential checks only
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: UserPassword,
}

/// Validated registration payload ready for insert
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: Email,
    pub password_hash: UserPassword,
}

impl NewUser {
    /// Materialize with a fresh id
    pub fn into_user(self, created_at: DateTime<Utc>) -> UserCredentials {
        UserCredentials {
            user: User {
                user_id: UserId::new(),
                user_name: self.user_name,
                email: self.email,
                created_at,
            },
            password_hash: self.password_hash,
        }
    }
}
