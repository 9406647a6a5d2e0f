//! Blog Backend Module
//!
//! Posts and categories. Anyone may read; authenticated users create
//! posts and categories; only a post's author may update or delete it.
//!
//! Layout mirrors the auth crate:
//! - `domain/` - Post and Category entities, repository traits
//! - `application/` - Use cases; mutations go through `auth::authorize_mutation`
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{BlogError, BlogResult};
pub use infra::{memory::InMemoryBlogRepository, postgres::PgBlogRepository};
pub use presentation::{BlogAppState, blog_router};
