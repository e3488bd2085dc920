use axum::routing::post;
use axum::Router;

use crate::handlers::login;
use crate::state::AppState;

/// Login route, merged directly into `/api`.
///
/// ```text
/// POST   /login             -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login::login))
}
