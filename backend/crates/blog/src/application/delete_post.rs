//! Delete Post Use Case

use std::sync::Arc;

use auth::authorize_mutation;
use kernel::id::{PostId, UserId};

use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult, POST_NOT_FOUND};

pub struct DeletePostUseCase<B>
where
    B: PostRepository,
{
    repo: Arc<B>,
}

impl<B> DeletePostUseCase<B>
where
    B: PostRepository,
{
    pub fn new(repo: Arc<B>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, identity: Option<UserId>, post_id: &PostId) -> BlogResult<()> {
        let post = self
            .repo
            .find_post(post_id)
            .await?
            .ok_or(BlogError::NotFound(POST_NOT_FOUND))?;

        authorize_mutation(identity.as_ref(), post.author())?;

        if !self.repo.delete_post(post_id).await? {
            return Err(BlogError::NotFound(POST_NOT_FOUND));
        }

        tracing::info!(post_id = %post_id, "Post deleted");

        Ok(())
    }
}
