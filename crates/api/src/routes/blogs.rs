//! Route definitions for blogs and their comments.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{blogs, comments};
use crate::state::AppState;

/// Blog routes mounted at `/blogs`.
///
/// ```text
/// GET    /                  -> list_blogs
/// POST   /                  -> create_blog (auth)
/// GET    /stats             -> blog_stats
/// GET    /comments          -> list_all_comments
/// PUT    /{id}              -> update_likes
/// DELETE /{id}              -> delete_blog (owner)
/// GET    /{id}/comments     -> list_comments
/// POST   /{id}/comments     -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::list_blogs).post(blogs::create_blog))
        .route("/stats", get(blogs::blog_stats))
        .route("/comments", get(comments::list_all_comments))
        .route("/{id}", put(blogs::update_likes).delete(blogs::delete_blog))
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
}
