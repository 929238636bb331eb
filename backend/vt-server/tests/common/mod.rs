#![allow(dead_code)]

//! Test infrastructure for vt-server API tests

use vt_auth::{HashingCost, SecretHasher, SessionManager, TokenConfig, TokenIssuer};
use vt_core::CredentialStore;
use vt_db::UserRepository;
use vt_server::{AppState, build_router};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use cookie::Cookie;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const ALICE_PASSWORD: &str = "Secr3t!";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    vt_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        access_secret: b"test-access-secret-at-least-32-bytes".to_vec(),
        access_ttl: Duration::from_secs(15 * 60),
        refresh_secret: b"test-refresh-secret-at-least-32-byte".to_vec(),
        refresh_ttl: Duration::from_secs(10 * 24 * 60 * 60),
    }
}

/// Cheapest valid argon2 parameters; keeps the suite fast
pub fn test_hasher() -> SecretHasher {
    SecretHasher::new(HashingCost {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Failed to build hasher")
}

/// AppState over an arbitrary store
pub fn app_state_with_store(
    store: Arc<dyn CredentialStore>,
    pool: SqlitePool,
    request_timeout: Duration,
) -> AppState {
    let issuer = TokenIssuer::new(&test_token_config());
    AppState {
        sessions: Arc::new(SessionManager::new(store, issuer, test_hasher())),
        pool,
        secure_cookies: true,
        request_timeout,
    }
}

/// Create AppState backed by SQLite
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    let store = Arc::new(UserRepository::new(pool.clone()));
    app_state_with_store(store, pool, Duration::from_secs(30))
}

pub async fn create_test_app() -> Router {
    build_router(create_test_app_state().await)
}

/// Response parts the tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

impl TestResponse {
    /// Parsed `Set-Cookie` headers
    pub fn set_cookies(&self) -> Vec<Cookie<'static>> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| Cookie::parse(v.to_str().unwrap().to_string()).unwrap())
            .collect()
    }

    pub fn set_cookie(&self, name: &str) -> Option<Cookie<'static>> {
        self.set_cookies().into_iter().find(|c| c.name() == name)
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        json,
    }
}

/// Request builder for JSON POST/PATCH calls with optional extra headers
pub fn json_request(method: &str, uri: &str, body: Value, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn alice_registration() -> Value {
    json!({
        "full_name": "Alice Liddell",
        "email": "alice@example.com",
        "username": "alice",
        "password": ALICE_PASSWORD,
        "avatar_url": "https://media.example.com/alice.png",
    })
}

pub async fn register_alice(app: &Router) -> Value {
    let response = send(
        app,
        json_request("POST", "/api/v1/users/register", alice_registration(), &[]),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json
}

/// Login with body delivery; returns (access, refresh)
pub async fn login_body(app: &Router, identifier: &str, password: &str) -> (String, String) {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/v1/users/login",
            json!({ "identifier": identifier, "password": password }),
            &[("X-Token-Delivery", "body")],
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    (
        response.json["access_token"].as_str().unwrap().to_string(),
        response.json["refresh_token"].as_str().unwrap().to_string(),
    )
}

/// Refresh with body delivery
pub async fn refresh_body(app: &Router, refresh_token: &str) -> TestResponse {
    send(
        app,
        json_request(
            "POST",
            "/api/v1/users/refresh-token",
            json!({ "refresh_token": refresh_token }),
            &[("X-Token-Delivery", "body")],
        ),
    )
    .await
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
