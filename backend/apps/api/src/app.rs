//! Router Composition
//!
//! `/api/auth/*` from the auth crate, `/api/posts` and `/api/categories`
//! from the blog crate. Both share one credential store and one token
//! verifier.

use std::sync::Arc;

use auth::AuthConfig;
use auth::presentation::AuthAppState;
use auth::store::UserRepository;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use blog::BlogAppState;
use blog::domain::{CategoryRepository, PostRepository};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the full application router over the given stores
pub fn build_router<U, B>(users: U, blog_repo: B, auth_config: AuthConfig) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    B: PostRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let auth_state = AuthAppState::new(users, auth_config);
    let blog_state = BlogAppState {
        repo: Arc::new(blog_repo),
        users: auth_state.repo.clone(),
        verifier: auth_state.verifier.clone(),
    };

    Router::new()
        .nest("/api/auth", auth::auth_router_generic(auth_state))
        .nest("/api", blog::blog_router(blog_state))
}

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

/// Router with tracing and CORS layers applied
pub fn with_layers(router: Router, origins: &[String]) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origins))
}
