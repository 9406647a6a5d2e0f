//! In-Memory Repository

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{CategoryId, PostId};
use tokio::sync::RwLock;

use crate::domain::entity::category::{Category, NewCategory};
use crate::domain::entity::post::Post;
use crate::domain::repository::{CategoryRepository, PostRepository};
use crate::error::{BlogError, BlogResult};

#[derive(Default)]
struct BlogTables {
    categories: HashMap<CategoryId, Category>,
    posts: HashMap<PostId, Post>,
}

/// In-memory post and category store
#[derive(Clone, Default)]
pub struct InMemoryBlogRepository {
    tables: Arc<RwLock<BlogTables>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CategoryRepository for InMemoryBlogRepository {
    async fn insert_category(&self, category: NewCategory) -> BlogResult<Category> {
        let mut tables = self.tables.write().await;

        if tables.categories.values().any(|c| c.name == category.name) {
            return Err(BlogError::DuplicateKey);
        }

        let category = category.into_category(Utc::now());
        tables
            .categories
            .insert(category.category_id, category.clone());

        Ok(category)
    }

    async fn list_categories(&self) -> BlogResult<Vec<Category>> {
        let mut categories: Vec<Category> =
            self.tables.read().await.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_category(&self, category_id: &CategoryId) -> BlogResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(category_id).cloned())
    }

    async fn exists_category_name(&self, name: &str) -> BlogResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .values()
            .any(|c| c.name == name))
    }
}

impl PostRepository for InMemoryBlogRepository {
    async fn insert_post(&self, post: &Post) -> BlogResult<()> {
        self.tables
            .write()
            .await
            .posts
            .insert(post.post_id(), post.clone());
        Ok(())
    }

    async fn list_posts(&self) -> BlogResult<Vec<Post>> {
        let mut posts: Vec<Post> = self.tables.read().await.posts.values().cloned().collect();
        posts.sort_by_key(|p| std::cmp::Reverse(p.created_at()));
        Ok(posts)
    }

    async fn find_post(&self, post_id: &PostId) -> BlogResult<Option<Post>> {
        Ok(self.tables.read().await.posts.get(post_id).cloned())
    }

    async fn update_post(&self, post: &Post) -> BlogResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.posts.get_mut(&post.post_id()) else {
            return Ok(false);
        };

        // Author stays as stored
        *stored = Post::restore(
            stored.post_id(),
            *stored.author(),
            post.title.clone(),
            post.content.clone(),
            post.category_id,
            stored.created_at(),
            post.updated_at(),
        );
        Ok(true)
    }

    async fn delete_post(&self, post_id: &PostId) -> BlogResult<bool> {
        Ok(self.tables.write().await.posts.remove(post_id).is_some())
    }
}
