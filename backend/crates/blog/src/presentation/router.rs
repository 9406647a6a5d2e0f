//! Blog Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use auth::require_bearer_token;
use auth::store::UserRepository;

use crate::domain::repository::{CategoryRepository, PostRepository};
use crate::presentation::handlers::{self, BlogAppState};

/// Create the blog router
///
/// Reads are public. Creating, updating and deleting require a bearer
/// token; update and delete additionally require post ownership.
pub fn blog_router<B, U>(state: BlogAppState<B, U>) -> Router
where
    B: PostRepository + CategoryRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/posts", get(handlers::list_posts::<B, U>))
        .route("/posts/{id}", get(handlers::get_post::<B, U>))
        .route("/categories", get(handlers::list_categories::<B, U>));

    let protected = Router::new()
        .route("/posts", post(handlers::create_post::<B, U>))
        .route(
            "/posts/{id}",
            put(handlers::update_post::<B, U>).delete(handlers::delete_post::<B, U>),
        )
        .route("/categories", post(handlers::create_category::<B, U>))
        .route_layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            require_bearer_token,
        ));

    public.merge(protected).with_state(state)
}
