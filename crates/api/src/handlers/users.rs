//! Handlers for the `/users` resource (registration and listing).

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use bloglist_core::error::CoreError;
use bloglist_db::models::user::{CreateUser, UserResponse};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::hash_blocking;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "username is required"),
        length(min = 3, message = "username must be at least 3 characters long")
    )]
    pub username: Option<String>,
    pub name: Option<String>,
    #[validate(
        required(message = "password is required"),
        length(min = 1, message = "password is required")
    )]
    pub password: Option<String>,
}

/// POST /api/users
///
/// Register a user. The password is hashed before it reaches the store and
/// the response never includes the hash.
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let (Some(username), Some(password)) = (input.username, input.password) else {
        return Err(AppError::Core(CoreError::Validation(
            "username and password are required".into(),
        )));
    };

    if state.store.users.find_by_username(&username).await?.is_some() {
        return Err(AppError::Core(CoreError::Validation(
            "username must be unique".into(),
        )));
    }

    let password_hash = hash_blocking(Arc::clone(&state.hasher), password).await?;

    // A concurrent registration of the same name is caught by the store.
    let user = state
        .store
        .users
        .create(&CreateUser {
            username,
            name: input.name,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Json(UserResponse::from(&user)))
}

/// GET /api/users
///
/// List all users with their owned blog ids.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.store.users.list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}
