//! Owner-only mutation checks for blogs.

use bloglist_core::access::check_owner;
use bloglist_core::types::DbId;
use bloglist_db::models::blog::Blog;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load blog `blog_id` and confirm `user` may mutate it.
///
/// Returns `Ok(None)` when the blog does not exist so idempotent operations
/// can treat that as success. Owner-less blogs follow the configured
/// [`UnownedPolicy`](bloglist_core::access::UnownedPolicy); a blog owned by
/// someone else is rejected with 403 Forbidden.
pub async fn authorize_blog_mutation(
    state: &AppState,
    user: &AuthUser,
    blog_id: DbId,
) -> AppResult<Option<Blog>> {
    let Some(blog) = state.store.blogs.find_by_id(blog_id).await? else {
        return Ok(None);
    };

    check_owner(blog.user_id, user.user_id, state.config.unowned_policy).map_err(|denial| {
        tracing::warn!(
            blog_id,
            user_id = user.user_id,
            owner_id = ?blog.user_id,
            reason = denial.reason(),
            "Blog mutation denied",
        );
        AppError::Core(denial.into())
    })?;

    Ok(Some(blog))
}
