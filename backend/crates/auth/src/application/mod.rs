//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod current_user;
pub mod guard;
pub mod login;
pub mod register;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use guard::{authorize_mutation, can_mutate};
pub use login::{LoginInput, LoginUseCase};
pub use register::{AuthOutput, RegisterInput, RegisterUseCase};
pub use token::{Claims, IssuedToken, TokenIssuer, TokenVerifier};
