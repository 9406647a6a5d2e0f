//! API DTOs (Data Transfer Objects)

use auth::models::UserResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{CreatePostInput, PostView, UpdatePostInput};
use crate::domain::entity::category::Category;

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.category_id.to_string(),
            name: category.name,
            created_at: category.created_at,
        }
    }
}

/// Category as embedded in a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
}

// ============================================================================
// Posts
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Category id
    pub category: Option<String>,
}

impl From<CreatePostRequest> for CreatePostInput {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            category: req.category,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

impl From<UpdatePostRequest> for UpdatePostInput {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            category: req.category,
        }
    }
}

/// Post with author and category populated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: Option<UserResponse>,
    pub category: Option<CategorySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostView> for PostResponse {
    fn from(view: PostView) -> Self {
        let post = view.post;
        Self {
            id: post.post_id().to_string(),
            author: view.author.as_ref().map(UserResponse::from),
            category: view.category.map(|c| CategorySummary {
                id: c.category_id.to_string(),
                name: c.name,
            }),
            created_at: post.created_at(),
            updated_at: post.updated_at(),
            title: post.title,
            content: post.content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}
