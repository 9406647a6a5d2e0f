//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::unique_violation_constraint;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{NewUser, User, UserCredentials};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId, email::Email, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult, DuplicateField};

/// Unique constraint on `users.email`
const USERS_EMAIL_KEY: &str = "users_email_key";
/// Unique constraint on `users.user_name_canonical`
const USERS_USER_NAME_KEY: &str = "users_user_name_canonical_key";

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate unique violations into `DuplicateKey`
fn map_insert_error(err: sqlx::Error) -> AuthError {
    match unique_violation_constraint(&err).as_deref() {
        Some(USERS_EMAIL_KEY) => AuthError::DuplicateKey(DuplicateField::Email),
        Some(USERS_USER_NAME_KEY) => AuthError::DuplicateKey(DuplicateField::UserName),
        _ => AuthError::Database(err),
    }
}

impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> AuthResult<User> {
        let credentials = user.into_user(Utc::now());

        // Single statement: the unique constraints decide concurrent races
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                user_name_canonical,
                email,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING user_id, user_name, email, password_hash, created_at
            "#,
        )
        .bind(credentials.user.user_id.as_uuid())
        .bind(credentials.user.user_name.original())
        .bind(credentials.user.user_name.canonical())
        .bind(credentials.user.email.as_str())
        .bind(credentials.password_hash.as_phc_string())
        .bind(credentials.user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(row.into_user())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credentials()).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, user_name, email, password_hash, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(self.user_name),
            email: Email::from_db(self.email),
            created_at: self.created_at,
        }
    }

    fn into_credentials(self) -> AuthResult<UserCredentials> {
        let password_hash = UserPassword::from_db(&self.password_hash)?;
        Ok(UserCredentials {
            user: self.into_user(),
            password_hash,
        })
    }
}
