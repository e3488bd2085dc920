//! Repository abstraction over the persistence engine.
//!
//! Handlers only ever see [`Store`]. It bundles a [`UserStore`] and a
//! [`BlogStore`] backed either by PostgreSQL ([`crate::repositories`]) or by
//! process memory ([`crate::memory::MemoryStore`]).
//!
//! Both backends keep `users.blog_ids` and `blogs.user_id` mutually
//! consistent: creating or deleting an owned blog updates the owner's list
//! inside the same transaction (or under the same write lock).

use std::sync::Arc;

use async_trait::async_trait;
use bloglist_core::types::DbId;

use crate::error::DbError;
use crate::memory::MemoryStore;
use crate::models::blog::{Blog, BlogWithOwner, CreateBlog};
use crate::models::comment::{Comment, CreateComment};
use crate::models::user::{CreateUser, User};
use crate::repositories::{BlogRepo, UserRepo};
use crate::DbPool;

/// Credential storage: accounts and their owned-blog back-references.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with [`DbError::DuplicateUsername`] or [`DbError::InvalidUsername`].
    async fn create(&self, input: &CreateUser) -> Result<User, DbError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, DbError>;

    /// Find a user by username (case-sensitive).
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError>;

    /// All users ordered by id.
    async fn list(&self) -> Result<Vec<User>, DbError>;

    /// Append `blog_id` to the user's blog list. No-op if already present
    /// or if the user does not exist.
    async fn append_owned_blog(&self, user_id: DbId, blog_id: DbId) -> Result<(), DbError>;

    /// Remove `blog_id` from the user's blog list. No-op if absent.
    async fn remove_owned_blog(&self, user_id: DbId, blog_id: DbId) -> Result<(), DbError>;
}

/// Blog and comment storage.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Insert a blog. When `input.user_id` is set the id is appended to the
    /// owner's blog list atomically; a missing owner yields
    /// [`DbError::MissingOwner`] and nothing is written.
    async fn create(&self, input: &CreateBlog) -> Result<Blog, DbError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Blog>, DbError>;

    /// All blogs ordered by id.
    async fn list(&self) -> Result<Vec<Blog>, DbError>;

    /// All blogs ordered by id, each joined with its owner's projection.
    async fn list_with_owner(&self) -> Result<Vec<BlogWithOwner>, DbError>;

    /// Set the like count. Returns `None` if no blog has this id.
    async fn update_likes(&self, id: DbId, likes: i64) -> Result<Option<Blog>, DbError>;

    /// Delete a blog, its comments, and the owner's back-reference.
    ///
    /// Returns the deleted row, or `None` if nothing matched.
    async fn delete(&self, id: DbId) -> Result<Option<Blog>, DbError>;

    /// Add a comment. Returns `None` if the blog does not exist.
    async fn add_comment(&self, input: &CreateComment) -> Result<Option<Comment>, DbError>;

    /// Comments of one blog ordered by id.
    async fn list_comments(&self, blog_id: DbId) -> Result<Vec<Comment>, DbError>;

    /// Every comment ordered by id.
    async fn list_all_comments(&self) -> Result<Vec<Comment>, DbError>;

    /// Check the backing store is reachable.
    async fn ping(&self) -> Result<(), DbError>;
}

/// The repositories handed to request handlers.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserStore>,
    pub blogs: Arc<dyn BlogStore>,
}

impl Store {
    /// Repositories backed by a PostgreSQL pool.
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            users: Arc::new(UserRepo::new(pool.clone())),
            blogs: Arc::new(BlogRepo::new(pool)),
        }
    }

    /// Repositories backed by a single in-process [`MemoryStore`].
    pub fn in_memory() -> Self {
        let memory = Arc::new(MemoryStore::new());
        Self {
            users: memory.clone(),
            blogs: memory,
        }
    }
}
