//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::InMemoryBlogRepository;
pub use postgres::PgBlogRepository;
