//! Common test utilities and helpers
//!
//! Builds the full router over in-memory stores and drives it with
//! `tower::ServiceExt::oneshot`, so no socket or database is needed.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use social_auth::backend::auth::{InMemoryPostStore, InMemoryUserStore};
use social_auth::backend::server::build_app;
use social_auth::shared::AuthConfig;

pub const TEST_PASSWORD: &str = "Abc@12345";

/// Router plus handles to the stores behind it
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserStore>,
    pub posts: Arc<InMemoryPostStore>,
}

/// Test configuration with the cheapest bcrypt cost
pub fn test_config() -> AuthConfig {
    AuthConfig::builder()
        .access_secret("integration-access-secret")
        .refresh_secret("integration-refresh-secret")
        .hash_cost(4)
        .build()
        .expect("valid test config")
}

pub fn test_app() -> TestApp {
    let users = Arc::new(InMemoryUserStore::new());
    let posts = Arc::new(InMemoryPostStore::new());
    let router = build_app(test_config(), users.clone(), posts.clone());
    TestApp { router, users, posts }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Send one request and return the status and parsed JSON body
///
/// An empty body is returned as `Value::Null`.
pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Register a user and return its subject id
pub async fn register_user(app: &TestApp, email: &str, username: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/register",
        None,
        Some(serde_json::json!({
            "email": email,
            "username": username,
            "password": TEST_PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["data"]["subjectId"].as_i64().unwrap()
}

/// Log in and return `(access_token, refresh_token)`
pub async fn login_user(app: &TestApp, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/login",
        None,
        Some(serde_json::json!({ "email": email, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    (
        body["data"]["token"].as_str().unwrap().to_string(),
        body["data"]["refreshToken"].as_str().unwrap().to_string(),
    )
}

/// Create a post as the bearer of `token` and return its id
pub async fn create_post(app: &TestApp, token: &str, slug: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/posts",
        Some(&auth_header(token)),
        Some(serde_json::json!({
            "title": "Hello",
            "slug": slug,
            "content": "First post",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create post failed: {}", body);
    body["data"]["id"].as_i64().unwrap()
}
