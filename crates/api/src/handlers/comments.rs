//! Handlers for comments nested under `/blogs`.

use axum::extract::State;
use axum::Json;
use bloglist_core::error::CoreError;
use bloglist_core::types::DbId;
use bloglist_db::models::comment::{Comment, CreateComment};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, ValidatedJson};
use crate::state::AppState;

/// Request body for `POST /blogs/{id}/comments`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(
        required(message = "content is required"),
        length(min = 1, message = "content is required")
    )]
    pub content: Option<String>,
}

/// POST /api/blogs/{id}/comments
///
/// Add a comment to an existing blog.
pub async fn add_comment(
    State(state): State<AppState>,
    PathParam(blog_id): PathParam<DbId>,
    ValidatedJson(input): ValidatedJson<CreateCommentRequest>,
) -> AppResult<Json<Comment>> {
    let content = input
        .content
        .ok_or_else(|| AppError::Core(CoreError::Validation("content is required".into())))?;

    let comment = state
        .store
        .blogs
        .add_comment(&CreateComment { blog_id, content })
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Blog",
            id: blog_id,
        }))?;

    tracing::info!(blog_id, comment_id = comment.id, "Comment added");

    Ok(Json(comment))
}

/// GET /api/blogs/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    PathParam(blog_id): PathParam<DbId>,
) -> AppResult<Json<Vec<Comment>>> {
    let comments = state.store.blogs.list_comments(blog_id).await?;
    Ok(Json(comments))
}

/// GET /api/blogs/comments
pub async fn list_all_comments(State(state): State<AppState>) -> AppResult<Json<Vec<Comment>>> {
    let comments = state.store.blogs.list_all_comments().await?;
    Ok(Json(comments))
}
