//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use kernel::error::violation::FieldViolation;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenIssuer, TokenVerifier};
use crate::application::{CurrentUserUseCase, LoginUseCase, RegisterUseCase};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    /// Build issuer and verifier from one config so they share the secret
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            issuer: Arc::new(TokenIssuer::new(&config)),
            verifier: Arc::new(TokenVerifier::new(&config)),
            config: Arc::new(config),
        }
    }
}

/// Unreadable JSON is reported as a violation of the `body` field
pub fn malformed_body(rejection: JsonRejection) -> AuthError {
    AuthError::Validation(vec![FieldViolation::new("body", rejection.body_text())])
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(malformed_body)?;

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(req.into()).await?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(malformed_body)?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(req.into()).await?;

    Ok(Json(output.into()))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    identity: AuthenticatedUser,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = CurrentUserUseCase::new(state.repo.clone())
        .execute(&identity.user_id)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}
