//! Application Layer
//!
//! Use cases for posts and categories. Every mutating post use case runs
//! the ownership guard between fetch and write.

pub mod categories;
pub mod create_post;
pub mod delete_post;
pub mod post_queries;
pub mod update_post;

// Re-exports
pub use categories::{CreateCategoryUseCase, ListCategoriesUseCase};
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use delete_post::DeletePostUseCase;
pub use post_queries::{PostQueries, PostView};
pub use update_post::{UpdatePostInput, UpdatePostUseCase};
