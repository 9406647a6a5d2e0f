//! Update Post Use Case
//!
//! validate -> fetch (404) -> ownership guard (401/403) -> category check
//! -> apply -> persist. Concurrent updates to the same post are
//! last-writer-wins.

use std::sync::Arc;

use auth::authorize_mutation;
use auth::store::UserRepository;
use chrono::Utc;
use kernel::error::violation::Violations;
use kernel::id::{PostId, UserId};

use crate::application::create_post::resolve_category;
use crate::application::post_queries::{PostQueries, PostView};
use crate::domain::entity::post::PostChanges;
use crate::domain::repository::{CategoryRepository, PostRepository};
use crate::error::{BlogError, BlogResult, POST_NOT_FOUND};

#[derive(Debug, Default)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

pub struct UpdatePostUseCase<B, U>
where
    B: PostRepository + CategoryRepository,
    U: UserRepository,
{
    repo: Arc<B>,
    users: Arc<U>,
}

impl<B, U> UpdatePostUseCase<B, U>
where
    B: PostRepository + CategoryRepository,
    U: UserRepository,
{
    pub fn new(repo: Arc<B>, users: Arc<U>) -> Self {
        Self { repo, users }
    }

    pub async fn execute(
        &self,
        identity: Option<UserId>,
        post_id: &PostId,
        input: UpdatePostInput,
    ) -> BlogResult<PostView> {
        let mut violations = Violations::default();
        let blank = |v: &Option<String>| v.as_ref().is_some_and(|s| s.trim().is_empty());
        violations.check(!blank(&input.title), "title", "Title cannot be empty");
        violations.check(!blank(&input.content), "content", "Content cannot be empty");
        violations.check(!blank(&input.category), "category", "Category cannot be empty");
        violations.finish().map_err(BlogError::Validation)?;

        let mut post = self
            .repo
            .find_post(post_id)
            .await?
            .ok_or(BlogError::NotFound(POST_NOT_FOUND))?;

        authorize_mutation(identity.as_ref(), post.author())?;

        let category_id = match input.category {
            Some(raw) => Some(resolve_category(self.repo.as_ref(), &raw).await?),
            None => None,
        };

        post.apply(
            PostChanges {
                title: input.title,
                content: input.content,
                category_id,
            },
            Utc::now(),
        );

        if !self.repo.update_post(&post).await? {
            return Err(BlogError::NotFound(POST_NOT_FOUND));
        }

        tracing::info!(post_id = %post_id, "Post updated");

        PostQueries::new(self.repo.clone(), self.users.clone())
            .view(post)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::create_post::{CreatePostInput, CreatePostUseCase};
    use crate::domain::entity::category::NewCategory;
    use crate::infra::memory::InMemoryBlogRepository;
    use auth::AuthError;
    use auth::InMemoryUserRepository;

    struct Fixture {
        repo: Arc<InMemoryBlogRepository>,
        users: Arc<InMemoryUserRepository>,
        owner: UserId,
        post_id: PostId,
    }

    async fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryBlogRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let category = repo
            .insert_category(NewCategory { name: "Tech".into() })
            .await
            .unwrap();
        let owner = UserId::new();

        let view = CreatePostUseCase::new(repo.clone(), users.clone())
            .execute(
                owner,
                CreatePostInput {
                    title: Some("Hello".into()),
                    content: Some("Body".into()),
                    category: Some(category.category_id.to_string()),
                },
            )
            .await
            .unwrap();

        Fixture {
            repo,
            users,
            owner,
            post_id: view.post.post_id(),
        }
    }

    fn retitle() -> UpdatePostInput {
        UpdatePostInput {
            title: Some("Edited".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_owner_updates() {
        let f = fixture().await;
        let view = UpdatePostUseCase::new(f.repo.clone(), f.users.clone())
            .execute(Some(f.owner), &f.post_id, retitle())
            .await
            .unwrap();

        assert_eq!(view.post.title, "Edited");
        assert_eq!(view.post.content, "Body");
        assert_eq!(*view.post.author(), f.owner);
        assert!(view.post.updated_at() >= view.post.created_at());
    }

    #[tokio::test]
    async fn test_guard_outcomes() {
        let f = fixture().await;
        let uc = UpdatePostUseCase::new(f.repo.clone(), f.users.clone());

        let err = uc
            .execute(Some(UserId::new()), &f.post_id, retitle())
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::Auth(AuthError::Forbidden)));

        let err = uc.execute(None, &f.post_id, retitle()).await.unwrap_err();
        assert!(matches!(err, BlogError::Auth(AuthError::Unauthenticated)));

        let stored = f.repo.find_post(&f.post_id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Hello");
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found() {
        let f = fixture().await;
        let err = UpdatePostUseCase::new(f.repo.clone(), f.users.clone())
            .execute(Some(f.owner), &PostId::new(), retitle())
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::NotFound(POST_NOT_FOUND)));
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let f = fixture().await;
        let err = UpdatePostUseCase::new(f.repo.clone(), f.users.clone())
            .execute(
                Some(f.owner),
                &f.post_id,
                UpdatePostInput {
                    title: Some(" ".into()),
                    content: Some(String::new()),
                    category: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::Validation(ref v) if v.len() == 2));
    }

    #[tokio::test]
    async fn test_unknown_category_rejected() {
        let f = fixture().await;
        let err = UpdatePostUseCase::new(f.repo.clone(), f.users.clone())
            .execute(
                Some(f.owner),
                &f.post_id,
                UpdatePostInput {
                    category: Some("not-a-uuid".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BlogError::InvalidCategory));
    }
}
