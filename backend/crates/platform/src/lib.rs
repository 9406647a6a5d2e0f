//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted, self-describing PHC strings)
//! - Token signing secret loading
//! - `Authorization: Bearer` header parsing

pub mod bearer;
pub mod password;
pub mod secret;
