//! Auth Middleware
//!
//! Bearer-token verification for protected routes. On success the resolved
//! identity is attached to the request as [`AuthenticatedUser`]; on any
//! failure the request is answered with 401 and never reaches the handler.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;

use crate::application::token::TokenVerifier;
use crate::domain::value_object::UserId;
use crate::error::AuthError;

/// Identity resolved from a verified bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid bearer token
///
/// Use with `axum::middleware::from_fn_with_state(verifier, require_bearer_token)`.
pub async fn require_bearer_token(
    State(verifier): State<Arc<TokenVerifier>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(req.headers()).map_err(|e| {
        tracing::debug!(error = %e, "Bearer token rejected");
        AuthError::Unauthenticated
    })?;

    let user_id = verifier.verify(token)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}
