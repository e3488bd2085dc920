//! In-process store used by tests and by deployments without `DATABASE_URL`.
//!
//! All tables live behind one [`RwLock`], so the paired blog/owner updates
//! that PostgreSQL performs in a transaction happen under a single write
//! guard here.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bloglist_core::types::DbId;
use bloglist_core::validation::is_valid_username;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::models::blog::{Blog, BlogWithOwner, CreateBlog, OwnerProjection};
use crate::models::comment::{Comment, CreateComment};
use crate::models::user::{CreateUser, User};
use crate::store::{BlogStore, UserStore};

#[derive(Default)]
struct Tables {
    users: BTreeMap<DbId, User>,
    blogs: BTreeMap<DbId, Blog>,
    comments: BTreeMap<DbId, Comment>,
    last_id: DbId,
}

impl Tables {
    /// Ids are unique across all tables and never reused.
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn append_owned_blog(&mut self, user_id: DbId, blog_id: DbId) {
        if let Some(user) = self.users.get_mut(&user_id) {
            if !user.blog_ids.contains(&blog_id) {
                user.blog_ids.push(blog_id);
            }
        }
    }

    fn remove_owned_blog(&mut self, user_id: DbId, blog_id: DbId) {
        if let Some(user) = self.users.get_mut(&user_id) {
            user.blog_ids.retain(|id| *id != blog_id);
        }
    }
}

/// A [`UserStore`] and [`BlogStore`] kept entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, input: &CreateUser) -> Result<User, DbError> {
        if !is_valid_username(&input.username) {
            return Err(DbError::InvalidUsername);
        }

        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == input.username) {
            return Err(DbError::DuplicateUsername(input.username.clone()));
        }

        let user = User {
            id: tables.next_id(),
            username: input.username.clone(),
            name: input.name.clone(),
            password_hash: input.password_hash.clone(),
            blog_ids: Vec::new(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, DbError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DbError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn append_owned_blog(&self, user_id: DbId, blog_id: DbId) -> Result<(), DbError> {
        self.tables.write().await.append_owned_blog(user_id, blog_id);
        Ok(())
    }

    async fn remove_owned_blog(&self, user_id: DbId, blog_id: DbId) -> Result<(), DbError> {
        self.tables.write().await.remove_owned_blog(user_id, blog_id);
        Ok(())
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn create(&self, input: &CreateBlog) -> Result<Blog, DbError> {
        let mut tables = self.tables.write().await;
        if let Some(owner_id) = input.user_id {
            if !tables.users.contains_key(&owner_id) {
                return Err(DbError::MissingOwner(owner_id));
            }
        }

        let blog = Blog {
            id: tables.next_id(),
            title: input.title.clone(),
            author: input.author.clone(),
            url: input.url.clone(),
            likes: input.likes,
            user_id: input.user_id,
            created_at: Utc::now(),
        };
        tables.blogs.insert(blog.id, blog.clone());
        if let Some(owner_id) = blog.user_id {
            tables.append_owned_blog(owner_id, blog.id);
        }
        Ok(blog)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Blog>, DbError> {
        Ok(self.tables.read().await.blogs.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Blog>, DbError> {
        Ok(self.tables.read().await.blogs.values().cloned().collect())
    }

    async fn list_with_owner(&self) -> Result<Vec<BlogWithOwner>, DbError> {
        let tables = self.tables.read().await;
        let blogs = tables
            .blogs
            .values()
            .map(|blog| {
                let owner = blog
                    .user_id
                    .and_then(|id| tables.users.get(&id))
                    .map(|user| OwnerProjection {
                        id: user.id,
                        username: user.username.clone(),
                        name: user.name.clone(),
                    });
                BlogWithOwner::new(blog.clone(), owner)
            })
            .collect();
        Ok(blogs)
    }

    async fn update_likes(&self, id: DbId, likes: i64) -> Result<Option<Blog>, DbError> {
        let mut tables = self.tables.write().await;
        Ok(tables.blogs.get_mut(&id).map(|blog| {
            blog.likes = likes;
            blog.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<Option<Blog>, DbError> {
        let mut tables = self.tables.write().await;
        let Some(blog) = tables.blogs.remove(&id) else {
            return Ok(None);
        };
        tables.comments.retain(|_, comment| comment.blog_id != id);
        if let Some(owner_id) = blog.user_id {
            tables.remove_owned_blog(owner_id, id);
        }
        Ok(Some(blog))
    }

    async fn add_comment(&self, input: &CreateComment) -> Result<Option<Comment>, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.blogs.contains_key(&input.blog_id) {
            return Ok(None);
        }
        let comment = Comment {
            id: tables.next_id(),
            blog_id: input.blog_id,
            content: input.content.clone(),
            created_at: Utc::now(),
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(Some(comment))
    }

    async fn list_comments(&self, blog_id: DbId) -> Result<Vec<Comment>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.blog_id == blog_id)
            .cloned()
            .collect())
    }

    async fn list_all_comments(&self) -> Result<Vec<Comment>, DbError> {
        Ok(self.tables.read().await.comments.values().cloned().collect())
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
