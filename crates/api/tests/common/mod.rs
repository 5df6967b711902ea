#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use careline_api::auth::jwt::JwtConfig;
use careline_api::auth::password::hash_password;
use careline_api::config::{LogFormat, ServerConfig, UploadConfig};
use careline_api::router::build_app_router;
use careline_api::state::AppState;
use careline_api::storage::LocalMediaStore;
use careline_db::models::user::{CreateUser, User};
use careline_db::repositories::{RoleRepo, UserRepo};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults and uploads under `upload_dir`.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        upload: UploadConfig {
            dir: upload_dir,
            public_path: "/uploads".to_string(),
            max_bytes: 1024 * 1024,
        },
        cookie_secure: false,
        session_cleanup_interval_secs: 3600,
        log_format: LogFormat::Pretty,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router against `pool`, storing uploads in
/// `upload_dir`.
pub fn build_test_app_with_uploads(pool: PgPool, upload_dir: PathBuf) -> Router {
    let config = test_config(upload_dir.clone());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media_store: Arc::new(LocalMediaStore::new(upload_dir)),
    };
    build_app_router(state, &config)
}

/// Build the full application router for tests that never upload files.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_uploads(pool, std::env::temp_dir().join("careline-test-uploads"))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with the named role and [`TEST_PASSWORD`].
pub async fn create_user_with_role(pool: &PgPool, username: &str, role: &str) -> User {
    let role = RoleRepo::find_by_name(pool, role)
        .await
        .unwrap()
        .expect("role is seeded by migrations");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@careline.test"),
            full_name: None,
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role_id: role.id,
        },
    )
    .await
    .unwrap()
}

/// Log in through the API and return `(access_token, refresh_token)`.
pub async fn login_tokens(app: Router, username: &str) -> (String, String) {
    let body = serde_json::json!({ "login": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/admin/auth/login", body).await;
    assert_eq!(response.status(), 200, "login should succeed for {username}");
    let json = body_json(response).await;
    (
        json["data"]["access_token"].as_str().unwrap().to_string(),
        json["data"]["refresh_token"].as_str().unwrap().to_string(),
    )
}

/// Log in through the API and return the access token.
pub async fn login(app: Router, username: &str) -> String {
    login_tokens(app, username).await.0
}

/// Send a raw body with an explicit content type.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    content_type: &str,
    body: &'static str,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Create a user with `role` and return an access token for them.
pub async fn token_for_role(pool: &PgPool, app: Router, role: &str) -> String {
    let username = format!("{role}-user");
    create_user_with_role(pool, &username, role).await;
    login(app, &username).await
}

/// A date `days` from today (UTC), formatted for JSON bodies.
pub fn days_from_now(days: i64) -> String {
    (chrono::Utc::now().date_naive() + chrono::Duration::days(days)).to_string()
}
