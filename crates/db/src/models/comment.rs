//! Comment entity model and DTOs.

use bloglist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `comments` table. Comments are never updated.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    #[serde(rename = "blog")]
    pub blog_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for creating a comment under a blog.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub blog_id: DbId,
    pub content: String,
}
