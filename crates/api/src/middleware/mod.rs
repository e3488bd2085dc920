//! Authorization guard.
//!
//! - [`auth::AuthUser`] -- resolves the requesting user from a bearer token.
//! - [`ownership::authorize_blog_mutation`] -- owner-only checks on blogs.

pub mod auth;
pub mod ownership;
