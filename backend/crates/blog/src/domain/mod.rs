//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::category::{Category, NewCategory};
pub use entity::post::{Post, PostChanges};
pub use repository::{CategoryRepository, PostRepository};
