//! User entity model and DTOs.

use bloglist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    /// Ids of the blogs this user owns, in creation order.
    pub blog_ids: Vec<DbId>,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<DbId>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            blogs: user.blog_ids.clone(),
        }
    }
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_never_contains_the_hash() {
        let user = User {
            id: 1,
            username: "atte".into(),
            name: Some("Atte Gates".into()),
            password_hash: "$argon2id$secret".into(),
            blog_ids: vec![3, 4],
            created_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("password_hash"));
        assert!(!object.contains_key("passwordHash"));
        assert!(!json.to_string().contains("secret"));
        assert_eq!(json["blogs"], serde_json::json!([3, 4]));
    }
}
