//! Handlers for the `/blogs` resource.
//!
//! Listing, liking, and statistics are public. Creating and deleting
//! require a bearer token; deletion is further limited to the blog's owner.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bloglist_core::access::Denial;
use bloglist_core::blog_stats::{favorite_blog, most_blogs, total_likes, AuthorBlogCount};
use bloglist_core::error::CoreError;
use bloglist_core::types::DbId;
use bloglist_db::models::blog::{Blog, BlogWithOwner, CreateBlog};
use bloglist_db::DbError;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::ownership::authorize_blog_mutation;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /blogs`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    pub author: Option<String>,
    #[validate(
        required(message = "url is required"),
        length(min = 1, message = "url is required")
    )]
    pub url: Option<String>,
    #[validate(range(min = 0, message = "likes must not be negative"))]
    pub likes: Option<i64>,
}

impl CreateBlogRequest {
    /// Turn a validated request into a store command owned by `owner`.
    fn into_command(self, owner: DbId) -> AppResult<CreateBlog> {
        let (Some(title), Some(url)) = (self.title, self.url) else {
            return Err(AppError::Core(CoreError::Validation(
                "title and url are required".into(),
            )));
        };
        Ok(CreateBlog {
            title,
            author: self.author,
            url,
            likes: self.likes.unwrap_or(0),
            user_id: Some(owner),
        })
    }
}

/// Request body for `PUT /blogs/{id}`. Any other fields are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLikesRequest {
    #[validate(
        required(message = "likes is required"),
        range(min = 0, message = "likes must not be negative")
    )]
    pub likes: Option<i64>,
}

/// Response body for `GET /blogs/stats`.
#[derive(Debug, Serialize)]
pub struct BlogStats {
    pub total_likes: i64,
    pub favorite_blog: Option<BlogWithOwner>,
    pub most_blogs: Option<AuthorBlogCount>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/blogs
///
/// List all blogs with their owner's projection.
pub async fn list_blogs(State(state): State<AppState>) -> AppResult<Json<Vec<BlogWithOwner>>> {
    let blogs = state.store.blogs.list_with_owner().await?;
    Ok(Json(blogs))
}

/// POST /api/blogs
///
/// Create a blog owned by the authenticated user. `likes` defaults to 0.
pub async fn create_blog(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateBlogRequest>,
) -> AppResult<Json<Blog>> {
    let command = input.into_command(auth.user_id)?;

    let blog = state
        .store
        .blogs
        .create(&command)
        .await
        .map_err(|err| match err {
            // The owner vanished between authentication and insert.
            DbError::MissingOwner(_) => AppError::Core(Denial::InvalidToken.into()),
            other => AppError::Db(other),
        })?;

    tracing::info!(
        blog_id = blog.id,
        user_id = auth.user_id,
        username = %auth.username,
        "Blog created"
    );

    Ok(Json(blog))
}

/// PUT /api/blogs/{id}
///
/// Replace the like count of a blog.
pub async fn update_likes(
    State(state): State<AppState>,
    PathParam(blog_id): PathParam<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateLikesRequest>,
) -> AppResult<Json<Blog>> {
    let likes = input
        .likes
        .ok_or_else(|| AppError::Core(CoreError::Validation("likes is required".into())))?;

    let blog = state
        .store
        .blogs
        .update_likes(blog_id, likes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Blog",
            id: blog_id,
        }))?;

    Ok(Json(blog))
}

/// DELETE /api/blogs/{id}
///
/// Delete a blog owned by the authenticated user. Returns 204 No Content,
/// also when the blog does not exist.
pub async fn delete_blog(
    auth: AuthUser,
    State(state): State<AppState>,
    PathParam(blog_id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    if authorize_blog_mutation(&state, &auth, blog_id)
        .await?
        .is_none()
    {
        tracing::debug!(blog_id, "Delete of absent blog treated as success");
        return Ok(StatusCode::NO_CONTENT);
    }

    state.store.blogs.delete(blog_id).await?;

    tracing::info!(
        blog_id,
        user_id = auth.user_id,
        username = %auth.username,
        "Blog deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/blogs/stats
///
/// Total likes, the most liked blog, and the most prolific author.
pub async fn blog_stats(State(state): State<AppState>) -> AppResult<Json<BlogStats>> {
    let blogs = state.store.blogs.list_with_owner().await?;

    Ok(Json(BlogStats {
        total_likes: total_likes(&blogs),
        favorite_blog: favorite_blog(&blogs).cloned(),
        most_blogs: most_blogs(&blogs),
    }))
}
