//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token issuing/verification, ownership guard
//! - `infra/` - PostgreSQL and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - Stateless sessions: HS256 bearer tokens, 24h validity by default
//! - Resource-owner authorization for mutating operations
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, per-record salt, optional pepper
//! - Unknown email and wrong password are reported identically
//! - Token failures of any kind surface as one `Unauthenticated` error

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::guard::{authorize_mutation, can_mutate};
pub use application::token::{TokenIssuer, TokenVerifier};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserRepository, postgres::PgUserRepository};
pub use presentation::middleware::{AuthenticatedUser, require_bearer_token};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::domain::repository::UserRepository;
    pub use crate::infra::memory::InMemoryUserRepository as MemoryStore;
    pub use crate::infra::postgres::PgUserRepository as PgStore;
}
