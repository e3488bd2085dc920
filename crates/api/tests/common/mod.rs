#![allow(dead_code)]

use std::sync::Arc;

use argon2::Params;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use bloglist_api::auth::jwt::JwtConfig;
use bloglist_api::auth::password::{Argon2Hasher, CredentialHasher};
use bloglist_api::config::ServerConfig;
use bloglist_api::router::build_app_router;
use bloglist_api::state::AppState;
use bloglist_core::access::UnownedPolicy;
use bloglist_db::Store;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults and non-expiring tokens.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_mins: None,
        },
        unowned_policy: UnownedPolicy::default(),
    }
}

/// An application instance plus the state behind it, so tests can seed the
/// store directly and still drive requests through the full middleware stack.
#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Build the application over a fresh in-memory store.
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

/// Build the application with a custom configuration.
pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    build_test_app_with_hasher(config, Arc::new(cheap_hasher()))
}

/// Argon2 with minimal cost so tests stay fast.
pub fn cheap_hasher() -> Argon2Hasher {
    Argon2Hasher::with_params(Params::new(8, 1, 1, None).unwrap())
}

/// Build the application with a custom configuration and password hasher.
pub fn build_test_app_with_hasher(
    config: ServerConfig,
    hasher: Arc<dyn CredentialHasher>,
) -> TestApp {
    let state = AppState::new(Store::in_memory(), config.clone(), hasher);
    let router = build_app_router(state.clone(), &config);
    TestApp { router, state }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: &TestApp,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_raw(app: &TestApp, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, None, body)).await
}

pub async fn delete(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_with_header(app: &TestApp, uri: &str, authorization: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: &TestApp, uri: &str, token: &str) -> Response<Body> {
    delete_with_header(app, uri, &format!("Bearer {token}")).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a user through the API and return the response JSON.
pub async fn create_user(app: &TestApp, username: &str, name: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "name": name, "password": password });
    let response = post_json(app, "/api/users", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Log in through the API and return the bearer token.
pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register and log in a user, returning `(user_id, token)`.
pub async fn user_with_token(app: &TestApp, username: &str) -> (i64, String) {
    let user = create_user(app, username, "Test User", "secret-pw").await;
    let token = login(app, username, "secret-pw").await;
    (user["id"].as_i64().unwrap(), token)
}

/// Create a blog through the API and return the response JSON.
pub async fn create_blog(app: &TestApp, token: &str, title: &str, likes: i64) -> serde_json::Value {
    let body = serde_json::json!({
        "title": title,
        "author": "Test Author",
        "url": format!("https://example.com/{}", title.replace(' ', "-")),
        "likes": likes,
    });
    let response = post_json_auth(app, "/api/blogs", token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}
