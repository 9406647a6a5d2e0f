//! Repository Traits

use kernel::id::{CategoryId, PostId};

use crate::domain::entity::category::{Category, NewCategory};
use crate::domain::entity::post::Post;
use crate::error::BlogResult;

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    /// Insert a category. Fails with `BlogError::DuplicateKey` if the name
    /// is taken; check and write are atomic.
    async fn insert_category(&self, category: NewCategory) -> BlogResult<Category>;

    /// All categories sorted by name
    async fn list_categories(&self) -> BlogResult<Vec<Category>>;

    async fn find_category(&self, category_id: &CategoryId) -> BlogResult<Option<Category>>;

    async fn exists_category_name(&self, name: &str) -> BlogResult<bool>;
}

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    async fn insert_post(&self, post: &Post) -> BlogResult<()>;

    /// All posts, newest first
    async fn list_posts(&self) -> BlogResult<Vec<Post>>;

    async fn find_post(&self, post_id: &PostId) -> BlogResult<Option<Post>>;

    /// Persist content fields. The stored author is never written.
    /// Returns `false` if the post no longer exists.
    async fn update_post(&self, post: &Post) -> BlogResult<bool>;

    /// Returns `false` if the post no longer exists
    async fn delete_post(&self, post_id: &PostId) -> BlogResult<bool>;
}
