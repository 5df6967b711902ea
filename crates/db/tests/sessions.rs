//! Refresh-session lifecycle and the periodic cleanup query.

use careline_core::roles::{ALL_ROLES, ROLE_NURSE};
use careline_core::types::DbId;
use careline_db::models::session::CreateSession;
use careline_db::models::user::CreateUser;
use careline_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use chrono::{Duration, Utc};
use sqlx::PgPool;

async fn nurse(pool: &PgPool, username: &str) -> DbId {
    let role = RoleRepo::find_by_name(pool, ROLE_NURSE).await.unwrap().unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@careline.test"),
            full_name: None,
            password_hash: "not-a-real-hash".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap()
    .id
}

async fn session(pool: &PgPool, user_id: DbId, hash: &str, expires_in: Duration) {
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id,
            refresh_token_hash: hash.to_string(),
            expires_at: Utc::now() + expires_in,
            user_agent: None,
            ip_address: None,
        },
    )
    .await
    .unwrap();
}

async fn remaining_hashes(pool: &PgPool) -> Vec<String> {
    sqlx::query_scalar("SELECT refresh_token_hash FROM user_sessions ORDER BY id")
        .fetch_all(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_token_is_single_use(pool: PgPool) {
    let user_id = nurse(&pool, "rotating").await;
    session(&pool, user_id, "live-hash", Duration::days(7)).await;

    let spent = SessionRepo::consume(&pool, "live-hash").await.unwrap().unwrap();
    assert_eq!(spent.user_id, user_id);
    assert!(spent.is_revoked);
    assert!(SessionRepo::consume(&pool, "live-hash").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_token_cannot_be_consumed(pool: PgPool) {
    let user_id = nurse(&pool, "late").await;
    session(&pool, user_id, "old-hash", Duration::hours(-1)).await;
    assert!(SessionRepo::consume(&pool, "old-hash").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cleanup_keeps_only_live_sessions(pool: PgPool) {
    let active = nurse(&pool, "active").await;
    let leaving = nurse(&pool, "leaving").await;

    session(&pool, active, "live", Duration::days(7)).await;
    session(&pool, active, "expired", Duration::days(-1)).await;
    session(&pool, active, "spent", Duration::days(7)).await;
    SessionRepo::consume(&pool, "spent").await.unwrap().unwrap();
    session(&pool, leaving, "deactivated", Duration::days(7)).await;
    assert!(UserRepo::deactivate(&pool, leaving).await.unwrap());

    let removed = SessionRepo::cleanup_expired(&pool).await.unwrap();
    assert_eq!(removed, 3);
    assert_eq!(remaining_hashes(&pool).await, vec!["live".to_string()]);

    // Nothing left to do on the next run.
    assert_eq!(SessionRepo::cleanup_expired(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_revoke_all_for_user_leaves_others(pool: PgPool) {
    let first = nurse(&pool, "first").await;
    let second = nurse(&pool, "second").await;
    session(&pool, first, "a1", Duration::days(7)).await;
    session(&pool, first, "a2", Duration::days(7)).await;
    session(&pool, second, "b1", Duration::days(7)).await;

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, first).await.unwrap(), 2);
    assert!(SessionRepo::consume(&pool, "a1").await.unwrap().is_none());
    assert!(SessionRepo::consume(&pool, "b1").await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_roles_listed_by_privilege(pool: PgPool) {
    let names: Vec<String> = RoleRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ALL_ROLES);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_active_role_lookup(pool: PgPool) {
    let user_id = nurse(&pool, "lookup").await;
    assert_eq!(
        RoleRepo::active_role_of_user(&pool, user_id).await.unwrap().as_deref(),
        Some(ROLE_NURSE)
    );

    UserRepo::deactivate(&pool, user_id).await.unwrap();
    assert!(RoleRepo::active_role_of_user(&pool, user_id).await.unwrap().is_none());
    assert!(RoleRepo::active_role_of_user(&pool, 9_999).await.unwrap().is_none());
}
