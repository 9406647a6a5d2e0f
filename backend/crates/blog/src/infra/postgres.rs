//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::unique_violation_constraint;
use kernel::id::{CategoryId, PostId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::category::{Category, NewCategory};
use crate::domain::entity::post::Post;
use crate::domain::repository::{CategoryRepository, PostRepository};
use crate::error::{BlogError, BlogResult};

/// Unique constraint on `categories.name`
const CATEGORIES_NAME_KEY: &str = "categories_name_key";

/// PostgreSQL-backed post and category store
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgBlogRepository {
    async fn insert_category(&self, category: NewCategory) -> BlogResult<Category> {
        let category = category.into_category(Utc::now());

        sqlx::query(
            r#"
            INSERT INTO categories (category_id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(category.category_id.as_uuid())
        .bind(&category.name)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match unique_violation_constraint(&e).as_deref() {
            Some(CATEGORIES_NAME_KEY) => BlogError::DuplicateKey,
            _ => BlogError::Database(e),
        })?;

        Ok(category)
    }

    async fn list_categories(&self) -> BlogResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT category_id, name, created_at FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn find_category(&self, category_id: &CategoryId) -> BlogResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT category_id, name, created_at FROM categories WHERE category_id = $1",
        )
        .bind(category_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn exists_category_name(&self, name: &str) -> BlogResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgBlogRepository {
    async fn insert_post(&self, post: &Post) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                author_id,
                title,
                content,
                category_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.post_id().as_uuid())
        .bind(post.author().as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.category_id.as_uuid())
        .bind(post.created_at())
        .bind(post.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_posts(&self) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, author_id, title, content, category_id, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn find_post(&self, post_id: &PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, author_id, title, content, category_id, created_at, updated_at
            FROM posts
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn update_post(&self, post: &Post) -> BlogResult<bool> {
        // author_id is never written after insert
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3, category_id = $4, updated_at = $5
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id().as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.category_id.as_uuid())
        .bind(post.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_post(&self, post_id: &PostId) -> BlogResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            category_id: CategoryId::from_uuid(self.category_id),
            name: self.name,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    author_id: Uuid,
    title: String,
    content: String,
    category_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post::restore(
            PostId::from_uuid(self.post_id),
            UserId::from_uuid(self.author_id),
            self.title,
            self.content,
            CategoryId::from_uuid(self.category_id),
            self.created_at,
            self.updated_at,
        )
    }
}
