//! Repository for the `blogs` and `comments` tables.

use async_trait::async_trait;
use bloglist_core::types::DbId;
use sqlx::PgPool;

use super::user_repo::{APPEND_OWNED_BLOG, REMOVE_OWNED_BLOG};
use crate::error::DbError;
use crate::models::blog::{Blog, BlogOwnerRow, BlogWithOwner, CreateBlog};
use crate::models::comment::{Comment, CreateComment};
use crate::store::BlogStore;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, author, url, likes, user_id, created_at";

const COMMENT_COLUMNS: &str = "id, blog_id, content, created_at";

/// Provides blog and comment persistence on PostgreSQL.
pub struct BlogRepo {
    pool: PgPool,
}

impl BlogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogStore for BlogRepo {
    async fn create(&self, input: &CreateBlog) -> Result<Blog, DbError> {
        let mut tx = self.pool.begin().await?;

        // Lock the owner row so a concurrent delete cannot interleave.
        if let Some(owner_id) = input.user_id {
            let owner: Option<(DbId,)> =
                sqlx::query_as("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                    .bind(owner_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if owner.is_none() {
                return Err(DbError::MissingOwner(owner_id));
            }
        }

        let query = format!(
            "INSERT INTO blogs (title, author, url, likes, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let blog = sqlx::query_as::<_, Blog>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.url)
            .bind(input.likes)
            .bind(input.user_id)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(owner_id) = blog.user_id {
            sqlx::query(APPEND_OWNED_BLOG)
                .bind(owner_id)
                .bind(blog.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(blog)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Blog>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        let blog = sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(blog)
    }

    async fn list(&self) -> Result<Vec<Blog>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM blogs ORDER BY id");
        let blogs = sqlx::query_as::<_, Blog>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(blogs)
    }

    async fn list_with_owner(&self) -> Result<Vec<BlogWithOwner>, DbError> {
        let rows = sqlx::query_as::<_, BlogOwnerRow>(
            "SELECT b.id, b.title, b.author, b.url, b.likes, b.user_id, b.created_at,
                    u.username AS owner_username, u.name AS owner_name
             FROM blogs b
             LEFT JOIN users u ON u.id = b.user_id
             ORDER BY b.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(BlogWithOwner::from).collect())
    }

    async fn update_likes(&self, id: DbId, likes: i64) -> Result<Option<Blog>, DbError> {
        let query = format!("UPDATE blogs SET likes = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let blog = sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(likes)
            .fetch_optional(&self.pool)
            .await?;
        Ok(blog)
    }

    async fn delete(&self, id: DbId) -> Result<Option<Blog>, DbError> {
        let mut tx = self.pool.begin().await?;

        // Comments are removed by ON DELETE CASCADE.
        let query = format!("DELETE FROM blogs WHERE id = $1 RETURNING {COLUMNS}");
        let deleted = sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(owner_id) = deleted.as_ref().and_then(|blog| blog.user_id) {
            sqlx::query(REMOVE_OWNED_BLOG)
                .bind(owner_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }

    async fn add_comment(&self, input: &CreateComment) -> Result<Option<Comment>, DbError> {
        // Inserts nothing when the blog does not exist.
        let query = format!(
            "INSERT INTO comments (blog_id, content)
             SELECT id, $2 FROM blogs WHERE id = $1
             RETURNING {COMMENT_COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(input.blog_id)
            .bind(&input.content)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn list_comments(&self, blog_id: DbId) -> Result<Vec<Comment>, DbError> {
        let query = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE blog_id = $1 ORDER BY id");
        let comments = sqlx::query_as::<_, Comment>(&query)
            .bind(blog_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(comments)
    }

    async fn list_all_comments(&self) -> Result<Vec<Comment>, DbError> {
        let query = format!("SELECT {COMMENT_COLUMNS} FROM comments ORDER BY id");
        let comments = sqlx::query_as::<_, Comment>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(comments)
    }

    async fn ping(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
