//! PostgreSQL implementations of the repository traits in [`crate::store`].

pub mod blog_repo;
pub mod user_repo;

pub use blog_repo::BlogRepo;
pub use user_repo::UserRepo;
