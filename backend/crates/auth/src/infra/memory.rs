//! In-Memory Repository
//!
//! Process-local credential store for development runs without
//! `DATABASE_URL` and for tests. Email and username uniqueness are checked
//! and the record inserted under one write lock, so concurrent inserts of
//! the same key cannot both succeed.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User, UserCredentials};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::{AuthError, AuthResult, DuplicateField};

#[derive(Default)]
struct UserTable {
    rows: HashMap<UserId, UserCredentials>,
    /// normalized email -> id
    by_email: HashMap<String, UserId>,
    /// canonical user name -> id
    by_user_name: HashMap<String, UserId>,
}

/// In-memory credential store
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records holding `email` (normalized)
    pub async fn count_by_email(&self, email: &str) -> usize {
        let email = email.trim().to_lowercase();
        self.table
            .read()
            .await
            .rows
            .values()
            .filter(|c| c.user.email.as_str() == email)
            .count()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> AuthResult<User> {
        let mut table = self.table.write().await;

        if table.by_email.contains_key(user.email.as_str()) {
            return Err(AuthError::DuplicateKey(DuplicateField::Email));
        }
        if table.by_user_name.contains_key(user.user_name.canonical()) {
            return Err(AuthError::DuplicateKey(DuplicateField::UserName));
        }

        let credentials = user.into_user(Utc::now());
        let user = credentials.user.clone();

        table
            .by_email
            .insert(user.email.as_str().to_string(), user.user_id);
        table
            .by_user_name
            .insert(user.user_name.canonical().to_string(), user.user_id);
        table.rows.insert(user.user_id, credentials);

        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserCredentials>> {
        let table = self.table.read().await;
        Ok(table
            .by_email
            .get(email.as_str())
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.get(user_id).map(|c| c.user.clone()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.table.read().await.by_email.contains_key(email.as_str()))
    }
}
