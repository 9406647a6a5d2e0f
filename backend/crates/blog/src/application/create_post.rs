//! Create Post Use Case

use std::sync::Arc;

use auth::store::UserRepository;
use chrono::Utc;
use kernel::error::violation::Violations;
use kernel::id::{CategoryId, UserId};

use crate::application::post_queries::{PostQueries, PostView};
use crate::domain::entity::post::Post;
use crate::domain::repository::{CategoryRepository, PostRepository};
use crate::error::{BlogError, BlogResult};

#[derive(Debug, Default)]
pub struct CreatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Category id
    pub category: Option<String>,
}

pub struct CreatePostUseCase<B, U>
where
    B: PostRepository + CategoryRepository,
    U: UserRepository,
{
    repo: Arc<B>,
    users: Arc<U>,
}

impl<B, U> CreatePostUseCase<B, U>
where
    B: PostRepository + CategoryRepository,
    U: UserRepository,
{
    pub fn new(repo: Arc<B>, users: Arc<U>) -> Self {
        Self { repo, users }
    }

    /// Create a post owned by `author`
    pub async fn execute(&self, author: UserId, input: CreatePostInput) -> BlogResult<PostView> {
        let mut violations = Violations::default();
        let title = required(input.title);
        let content = required(input.content);
        let category = required(input.category);
        violations.check(title.is_some(), "title", "Title is required");
        violations.check(content.is_some(), "content", "Content is required");
        violations.check(category.is_some(), "category", "Category is required");
        violations.finish().map_err(BlogError::Validation)?;

        let (Some(title), Some(content), Some(category)) = (title, content, category) else {
            return Err(BlogError::Internal("validation state mismatch".to_string()));
        };

        let category_id = resolve_category(self.repo.as_ref(), &category).await?;

        let post = Post::new(author, title, content, category_id, Utc::now());
        self.repo.insert_post(&post).await?;

        tracing::info!(post_id = %post.post_id(), user_id = %author, "Post created");

        PostQueries::new(self.repo.clone(), self.users.clone())
            .view(post)
            .await
    }
}

/// Present and not blank
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a category reference and check that it exists
pub(crate) async fn resolve_category<B>(repo: &B, raw: &str) -> BlogResult<CategoryId>
where
    B: CategoryRepository,
{
    let category_id: CategoryId = raw
        .trim()
        .parse()
        .map_err(|_| BlogError::InvalidCategory)?;

    match repo.find_category(&category_id).await? {
        Some(_) => Ok(category_id),
        None => Err(BlogError::InvalidCategory),
    }
}
