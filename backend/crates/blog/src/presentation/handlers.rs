//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::store::UserRepository;
use auth::{AuthenticatedUser, TokenVerifier};
use kernel::error::violation::FieldViolation;
use kernel::id::PostId;

use crate::application::{
    CreateCategoryUseCase, CreatePostUseCase, DeletePostUseCase, ListCategoriesUseCase,
    PostQueries, UpdatePostUseCase,
};
use crate::domain::repository::{CategoryRepository, PostRepository};
use crate::error::{BlogError, BlogResult, POST_NOT_FOUND};
use crate::presentation::dto::{
    CategoryResponse, CreateCategoryRequest, CreatePostRequest, MessageResponse, PostResponse,
    UpdatePostRequest,
};

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogAppState<B, U>
where
    B: PostRepository + CategoryRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<B>,
    /// Credential store, for author lookups
    pub users: Arc<U>,
    pub verifier: Arc<TokenVerifier>,
}

fn malformed_body(rejection: JsonRejection) -> BlogError {
    BlogError::Validation(vec![FieldViolation::new("body", rejection.body_text())])
}

/// Unparseable ids cannot name an existing post
fn parse_post_id(raw: &str) -> BlogResult<PostId> {
    raw.parse().map_err(|_| BlogError::NotFound(POST_NOT_FOUND))
}

// ============================================================================
// Posts
// ============================================================================

/// GET /api/posts
pub async fn list_posts<B, U>(
    State(state): State<BlogAppState<B, U>>,
) -> BlogResult<Json<Vec<PostResponse>>>
where
    B: PostRepository + CategoryRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let views = PostQueries::new(state.repo.clone(), state.users.clone())
        .list()
        .await?;

    Ok(Json(views.into_iter().map(PostResponse::from).collect()))
}

/// GET /api/posts/{id}
pub async fn get_post<B, U>(
    State(state): State<BlogAppState<B, U>>,
    Path(id): Path<String>,
) -> BlogResult<Json<PostResponse>>
where
    B: PostRepository + CategoryRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;
    let view = PostQueries::new(state.repo.clone(), state.users.clone())
        .get(&post_id)
        .await?;

    Ok(Json(view.into()))
}

/// POST /api/posts
pub async fn create_post<B, U>(
    State(state): State<BlogAppState<B, U>>,
    identity: AuthenticatedUser,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> BlogResult<(StatusCode, Json<PostResponse>)>
where
    B: PostRepository + CategoryRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(malformed_body)?;

    let view = CreatePostUseCase::new(state.repo.clone(), state.users.clone())
        .execute(identity.user_id, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

/// PUT /api/posts/{id}
pub async fn update_post<B, U>(
    State(state): State<BlogAppState<B, U>>,
    identity: AuthenticatedUser,
    Path(id): Path<String>,
    body: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> BlogResult<Json<PostResponse>>
where
    B: PostRepository + CategoryRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(malformed_body)?;
    let post_id = parse_post_id(&id)?;

    let view = UpdatePostUseCase::new(state.repo.clone(), state.users.clone())
        .execute(Some(identity.user_id), &post_id, req.into())
        .await?;

    Ok(Json(view.into()))
}

/// DELETE /api/posts/{id}
pub async fn delete_post<B, U>(
    State(state): State<BlogAppState<B, U>>,
    identity: AuthenticatedUser,
    Path(id): Path<String>,
) -> BlogResult<Json<MessageResponse>>
where
    B: PostRepository + CategoryRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;

    DeletePostUseCase::new(state.repo.clone())
        .execute(Some(identity.user_id), &post_id)
        .await?;

    Ok(Json(MessageResponse {
        msg: "Post deleted".to_string(),
    }))
}

// ============================================================================
// Categories
// ============================================================================

/// GET /api/categories
pub async fn list_categories<B, U>(
    State(state): State<BlogAppState<B, U>>,
) -> BlogResult<Json<Vec<CategoryResponse>>>
where
    B: PostRepository + CategoryRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let categories = ListCategoriesUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// POST /api/categories
pub async fn create_category<B, U>(
    State(state): State<BlogAppState<B, U>>,
    _identity: AuthenticatedUser,
    body: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> BlogResult<(StatusCode, Json<CategoryResponse>)>
where
    B: PostRepository + CategoryRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(malformed_body)?;

    let category = CreateCategoryUseCase::new(state.repo.clone())
        .execute(req.name)
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}
