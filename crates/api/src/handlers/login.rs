//! Handler for `/login`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use bloglist_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_blocking;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /login`.
///
/// Both fields are optional so that absent or `null` credentials reach the
/// credential check and fail there like any other mismatch.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
    /// Token lifetime in seconds; absent when tokens do not expire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

/// POST /api/login
///
/// Authenticate with username + password and receive a bearer token.
///
/// Every failure is the same 401: unknown username, wrong password, missing
/// or mistyped fields, or an unreadable body. Unknown usernames are checked
/// against a decoy hash so they take as long as a wrong password.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let input = body.map(|Json(input)| input).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Unreadable login body");
        LoginRequest::default()
    });

    let user = match input.username.as_deref() {
        Some(username) => state.store.users.find_by_username(username).await?,
        None => None,
    };

    let stored_hash = match &user {
        Some(user) => user.password_hash.clone(),
        None => state.decoy_hash().await?,
    };
    let password_valid = verify_blocking(
        Arc::clone(&state.hasher),
        input.password.unwrap_or_default(),
        stored_hash,
    )
    .await?;

    let Some(user) = user.filter(|_| password_valid) else {
        tracing::warn!(username = ?input.username, "Failed login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            "invalid username or password".into(),
        )));
    };

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
        expires_in: state.tokens.expires_in_secs(),
    }))
}
