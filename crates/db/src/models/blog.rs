//! Blog entity model, owner projection, and DTOs.

use bloglist_core::blog_stats::BlogSummary;
use bloglist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `blogs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    /// Owning user, set only for blogs created through the authenticated path.
    #[serde(rename = "user")]
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// The subset of a user embedded in blog listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerProjection {
    pub id: DbId,
    pub username: String,
    pub name: Option<String>,
}

/// A blog joined with its owner's projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogWithOwner {
    pub id: DbId,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: Option<OwnerProjection>,
    pub created_at: Timestamp,
}

impl BlogWithOwner {
    /// Attach an owner projection to a blog row.
    pub fn new(blog: Blog, owner: Option<OwnerProjection>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner,
            created_at: blog.created_at,
        }
    }
}

/// Flat row produced by the blogs/users join.
#[derive(Debug, FromRow)]
pub(crate) struct BlogOwnerRow {
    pub id: DbId,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub owner_username: Option<String>,
    pub owner_name: Option<String>,
}

impl From<BlogOwnerRow> for BlogWithOwner {
    fn from(row: BlogOwnerRow) -> Self {
        // LEFT JOIN: username is NULL when the blog has no owner.
        let owner = match (row.user_id, row.owner_username) {
            (Some(id), Some(username)) => Some(OwnerProjection {
                id,
                username,
                name: row.owner_name,
            }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            url: row.url,
            likes: row.likes,
            user: owner,
            created_at: row.created_at,
        }
    }
}

impl BlogSummary for Blog {
    fn likes(&self) -> i64 {
        self.likes
    }

    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

impl BlogSummary for BlogWithOwner {
    fn likes(&self) -> i64 {
        self.likes
    }

    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a blog. Required fields are already validated.
#[derive(Debug, Clone)]
pub struct CreateBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    /// When set, the blog id is also appended to this user's blog list.
    pub user_id: Option<DbId>,
}
