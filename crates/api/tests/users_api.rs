//! User administration: password reset and session revocation.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_json_auth, token_for_role};
use serde_json::json;
use sqlx::PgPool;

const NEW_PASSWORD: &str = "a-much-better-passphrase";

#[sqlx::test(migrations = "../db/migrations")]
async fn reset_password_signs_user_out(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for_role(&pool, app.clone(), "admin").await;
    let nurse = common::create_user_with_role(&pool, "forgetful", "nurse").await;
    let (_, refresh_token) = common::login_tokens(app.clone(), "forgetful").await;
    let uri = format!("/api/admin/users/{}/reset-password", nurse.id);

    let response =
        post_json_auth(app.clone(), &uri, json!({ "new_password": "short" }), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response =
        post_json_auth(app.clone(), &uri, json!({ "new_password": NEW_PASSWORD }), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The refresh token issued before the reset is dead.
    let response = post_json(
        app.clone(),
        "/api/admin/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let old = json!({ "login": "forgetful", "password": common::TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/admin/auth/login", old).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let new = json!({ "login": "forgetful", "password": NEW_PASSWORD });
    let response = post_json(app, "/api/admin/auth/login", new).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reset_password_unknown_user_is_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = token_for_role(&pool, app.clone(), "admin").await;

    let response = post_json_auth(
        app,
        "/api/admin/users/9999/reset-password",
        json!({ "new_password": NEW_PASSWORD }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn editor_cannot_reset_passwords(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let editor = token_for_role(&pool, app.clone(), "editor").await;
    let nurse = common::create_user_with_role(&pool, "someone", "nurse").await;

    let response = post_json_auth(
        app,
        &format!("/api/admin/users/{}/reset-password", nurse.id),
        json!({ "new_password": NEW_PASSWORD }),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
