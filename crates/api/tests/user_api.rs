//! HTTP-level integration tests for `/api/users` registration and listing.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_user, get, post_json};
use serde_json::json;

#[tokio::test]
async fn register_returns_user_without_password_hash() {
    let app = build_test_app();
    let response = post_json(
        &app,
        "/api/users",
        json!({ "username": "mluukkai", "name": "Matti Luukkainen", "password": "salainen" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["username"], "mluukkai");
    assert_eq!(json["name"], "Matti Luukkainen");
    assert_eq!(json["blogs"], json!([]));

    let text = json.to_string();
    assert!(!text.contains("salainen"));
    assert!(!text.contains("password"));
    assert!(!text.contains("argon2"));
}

#[tokio::test]
async fn name_is_optional() {
    let app = build_test_app();
    let response = post_json(
        &app,
        "/api/users",
        json!({ "username": "anonymous", "password": "pw" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], serde_json::Value::Null);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = build_test_app();
    create_user(&app, "root", "Superuser", "first").await;

    let response = post_json(
        &app,
        "/api/users",
        json!({ "username": "root", "name": "Impostor", "password": "second" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("unique"));

    let users = body_json(get(&app, "/api/users").await).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn usernames_are_case_sensitive() {
    let app = build_test_app();
    create_user(&app, "root", "Lower", "pw").await;

    let response = post_json(
        &app,
        "/api/users",
        json!({ "username": "Root", "password": "pw" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn short_username_is_rejected() {
    let app = build_test_app();
    let response = post_json(
        &app,
        "/api/users",
        json!({ "username": "ab", "password": "pw" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "username must be at least 3 characters long"
    );
}

#[tokio::test]
async fn three_character_username_is_accepted() {
    let app = build_test_app();
    let response = post_json(
        &app,
        "/api/users",
        json!({ "username": "abc", "password": "pw" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = build_test_app();

    let response = post_json(&app, "/api/users", json!({ "username": "nopass" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "password is required");

    let response = post_json(&app, "/api/users", json!({ "username": "nopass", "password": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(&app, "/api/users", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "password is required; username is required"
    );

    let users = body_json(get(&app, "/api/users").await).await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn list_users_returns_all_accounts() {
    let app = build_test_app();
    create_user(&app, "alpha", "Alpha", "pw").await;
    create_user(&app, "bravo", "Bravo", "pw").await;

    let response = get(&app, "/api/users").await;
    assert_eq!(response.status(), StatusCode::OK);

    let users = body_json(response).await;
    let names: Vec<_> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["alpha", "bravo"]);
    assert!(users[0].get("password_hash").is_none());
}
