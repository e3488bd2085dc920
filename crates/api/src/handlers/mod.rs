//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in [`bloglist_db::Store`] and map
//! errors via [`AppError`](crate::error::AppError).

pub mod blogs;
pub mod comments;
pub mod login;
pub mod users;
