//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use bloglist_core::access::{bearer_token, Denial};
use bloglist_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated user resolved from the `Authorization: Bearer <token>` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`, confirmed to exist).
    pub user_id: DbId,
    pub username: String,
}

/// Run the authentication steps of the guard against request headers.
///
/// 1. No bearer credential -> [`Denial::MissingToken`].
/// 2. Token fails verification -> [`Denial::InvalidToken`].
/// 3. Token names a user that does not exist -> [`Denial::InvalidToken`].
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> AppResult<AuthUser> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| deny(Denial::MissingToken))?;

    let claims = state.tokens.verify(token).map_err(|err| {
        tracing::debug!(error = %err, "Rejected bearer token");
        deny(Denial::InvalidToken)
    })?;

    let user = state
        .store
        .users
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_id = claims.sub, "Token refers to an unknown user");
            deny(Denial::InvalidToken)
        })?;

    Ok(AuthUser {
        user_id: user.id,
        username: user.username,
    })
}

fn deny(denial: Denial) -> AppError {
    AppError::Core(denial.into())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(state, &parts.headers).await
    }
}
