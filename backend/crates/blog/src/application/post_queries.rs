//! Post Queries
//!
//! Read side for posts. Every post is returned together with its author
//! profile and category, looked up once per distinct id.

use std::collections::HashMap;
use std::sync::Arc;

use auth::domain::entity::user::User;
use auth::store::UserRepository;
use kernel::id::{CategoryId, PostId, UserId};

use crate::domain::entity::category::Category;
use crate::domain::entity::post::Post;
use crate::domain::repository::{CategoryRepository, PostRepository};
use crate::error::{BlogError, BlogResult, POST_NOT_FOUND};

/// Post with referenced records resolved. A reference whose record has
/// disappeared resolves to `None`.
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub author: Option<User>,
    pub category: Option<Category>,
}

pub struct PostQueries<B, U>
where
    B: PostRepository + CategoryRepository,
    U: UserRepository,
{
    repo: Arc<B>,
    users: Arc<U>,
}

impl<B, U> PostQueries<B, U>
where
    B: PostRepository + CategoryRepository,
    U: UserRepository,
{
    pub fn new(repo: Arc<B>, users: Arc<U>) -> Self {
        Self { repo, users }
    }

    /// All posts, newest first
    pub async fn list(&self) -> BlogResult<Vec<PostView>> {
        let posts = self.repo.list_posts().await?;

        let mut authors: HashMap<UserId, Option<User>> = HashMap::new();
        let mut categories: HashMap<CategoryId, Option<Category>> = HashMap::new();

        for post in &posts {
            if !authors.contains_key(post.author()) {
                let user = self.users.find_by_id(post.author()).await?;
                authors.insert(*post.author(), user);
            }
            if !categories.contains_key(&post.category_id) {
                let category = self.repo.find_category(&post.category_id).await?;
                categories.insert(post.category_id, category);
            }
        }

        Ok(posts
            .into_iter()
            .map(|post| PostView {
                author: authors.get(post.author()).cloned().flatten(),
                category: categories.get(&post.category_id).cloned().flatten(),
                post,
            })
            .collect())
    }

    /// Single post by id
    pub async fn get(&self, post_id: &PostId) -> BlogResult<PostView> {
        let post = self
            .repo
            .find_post(post_id)
            .await?
            .ok_or(BlogError::NotFound(POST_NOT_FOUND))?;

        self.view(post).await
    }

    /// Resolve the author and category of one post
    pub async fn view(&self, post: Post) -> BlogResult<PostView> {
        let author = self.users.find_by_id(post.author()).await?;
        let category = self.repo.find_category(&post.category_id).await?;

        Ok(PostView {
            post,
            author,
            category,
        })
    }
}
