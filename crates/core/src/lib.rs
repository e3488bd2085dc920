//! Domain types and pure logic for the blog list service.
//!
//! Nothing in this crate performs I/O; persistence lives in `bloglist-db`
//! and the HTTP surface in `bloglist-api`.

pub mod access;
pub mod blog_stats;
pub mod error;
pub mod types;
pub mod validation;
