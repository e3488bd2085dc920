pub mod blogs;
pub mod health;
pub mod login;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                      login (public)
///
/// /users                      list, register (public)
///
/// /blogs                      list (public), create (requires auth)
/// /blogs/stats                aggregate statistics (public)
/// /blogs/comments             every comment (public)
/// /blogs/{id}                 update likes (public), delete (owner only)
/// /blogs/{id}/comments        list, add (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(login::router())
        .nest("/users", users::router())
        .nest("/blogs", blogs::router())
}
