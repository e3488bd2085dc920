//! Repository for the `users` table.

use async_trait::async_trait;
use bloglist_core::types::DbId;
use sqlx::PgPool;

use crate::error::{pg_codes, DbError};
use crate::models::user::{CreateUser, User};
use crate::store::UserStore;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, name, password_hash, blog_ids, created_at";

/// Append a blog id unless it is already in the list.
pub(crate) const APPEND_OWNED_BLOG: &str = "UPDATE users SET blog_ids = array_append(blog_ids, $2) \
     WHERE id = $1 AND NOT ($2 = ANY(blog_ids))";

pub(crate) const REMOVE_OWNED_BLOG: &str =
    "UPDATE users SET blog_ids = array_remove(blog_ids, $2) WHERE id = $1";

/// Provides user persistence on PostgreSQL.
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn create(&self, input: &CreateUser) -> Result<User, DbError> {
        let query = format!(
            "INSERT INTO users (username, name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.name)
            .bind(&input.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| classify_insert_error(err, &input.username))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn append_owned_blog(&self, user_id: DbId, blog_id: DbId) -> Result<(), DbError> {
        sqlx::query(APPEND_OWNED_BLOG)
            .bind(user_id)
            .bind(blog_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove_owned_blog(&self, user_id: DbId, blog_id: DbId) -> Result<(), DbError> {
        sqlx::query(REMOVE_OWNED_BLOG)
            .bind(user_id)
            .bind(blog_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Turn username constraint violations into their dedicated variants.
fn classify_insert_error(err: sqlx::Error, username: &str) -> DbError {
    if let sqlx::Error::Database(db_err) = &err {
        match (db_err.code().as_deref(), db_err.constraint()) {
            (Some(pg_codes::UNIQUE_VIOLATION), Some("uq_users_username")) => {
                return DbError::DuplicateUsername(username.to_string());
            }
            (Some(pg_codes::CHECK_VIOLATION), Some("ck_users_username_length")) => {
                return DbError::InvalidUsername;
            }
            _ => {}
        }
    }
    DbError::Database(err)
}
