//! Handlers for `/api/admin/users` (back-office accounts).
//!
//! Guarded by [`RequireUsers`]. Role grants go through
//! [`can_assign_role`], so admins cannot mint superadmins and nobody can
//! modify an account that outranks them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use careline_core::error::CoreError;
use careline_core::roles::{can_assign_role, ROLE_SUPERADMIN};
use careline_core::types::DbId;
use careline_db::models::role::Role;
use careline_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use careline_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use super::non_blank;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{validate_request, AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireUsers;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    pub full_name: Option<String>,
    pub password: String,
    /// Role name, e.g. `nurse`.
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/users
pub async fn list(
    State(state): State<AppState>,
    RequireUsers(_admin): RequireUsers,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let roles = RoleRepo::list(&state.pool).await?;

    let responses = users
        .iter()
        .map(|u| UserResponse::from_user(u, role_name(&roles, u.role_id)))
        .collect();
    Ok(Json(ApiResponse::ok(responses)))
}

/// POST /api/admin/users
pub async fn create(
    State(state): State<AppState>,
    RequireUsers(admin): RequireUsers,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    validate_request(&input)?;
    let role = assignable_role(&state, &admin, &input.role).await?;
    let password_hash = hash_new_password(&input.password)?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username.trim().to_string(),
            email: input.email.trim().to_string(),
            full_name: non_blank(input.full_name),
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %role.name, created_by = admin.user_id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from_user(&user, role.name))),
    ))
}

/// GET /api/admin/users/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireUsers(_admin): RequireUsers,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = find_user(&state, id).await?;
    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from_user(&user, role))))
}

/// PUT /api/admin/users/{id}
///
/// Profile, role and active flag. Passwords change through
/// `reset-password` only.
pub async fn update(
    State(state): State<AppState>,
    RequireUsers(admin): RequireUsers,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    validate_request(&input)?;
    let target = find_user(&state, id).await?;
    ensure_can_manage(&state, &admin, &target).await?;

    if id == admin.user_id && input.is_active == Some(false) {
        return Err(AppError::conflict("You cannot deactivate your own account"));
    }

    let role_id = match input.role.as_deref() {
        Some(name) => Some(assignable_role(&state, &admin, name).await?.id),
        None => None,
    };

    let user = UserRepo::update(
        &state.pool,
        id,
        &UpdateUser {
            username: input.username.map(|u| u.trim().to_string()),
            email: input.email.map(|e| e.trim().to_string()),
            full_name: input.full_name,
            role_id,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found("User", id))?;

    if input.is_active == Some(false) || role_id.is_some_and(|r| r != target.role_id) {
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    }

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    tracing::info!(user_id = id, updated_by = admin.user_id, "User updated");
    Ok(Json(ApiResponse::ok(UserResponse::from_user(&user, role))))
}

/// DELETE /api/admin/users/{id}
///
/// Deactivates the account and revokes its sessions. Rows are kept so
/// audit columns (`confirmed_by`, `created_by`) stay resolvable.
pub async fn delete(
    State(state): State<AppState>,
    RequireUsers(admin): RequireUsers,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::conflict("You cannot deactivate your own account"));
    }
    let target = find_user(&state, id).await?;
    ensure_can_manage(&state, &admin, &target).await?;

    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::conflict("User is already inactive"));
    }
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, revoked, deactivated_by = admin.user_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/users/{id}/reset-password
///
/// Sets a new password and signs the user out everywhere.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireUsers(admin): RequireUsers,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    let target = find_user(&state, id).await?;
    ensure_can_manage(&state, &admin, &target).await?;
    let hashed = hash_new_password(&input.new_password)?;

    if !UserRepo::update_password(&state.pool, id, &hashed).await? {
        return Err(AppError::not_found("User", id));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, reset_by = admin.user_id, "Password reset");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn role_name(roles: &[Role], role_id: DbId) -> String {
    roles
        .iter()
        .find(|r| r.id == role_id)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))
}

/// Look up `name` and check that `admin` may grant it.
async fn assignable_role(state: &AppState, admin: &AuthUser, name: &str) -> AppResult<Role> {
    let role = RoleRepo::find_by_name(&state.pool, name.trim())
        .await?
        .ok_or_else(|| AppError::validation(format!("Unknown role '{}'", name.trim())))?;
    if !can_assign_role(&admin.role, &role.name) {
        return Err(AppError::forbidden(format!(
            "Your role cannot assign the '{}' role",
            role.name
        )));
    }
    Ok(role)
}

/// Only superadmins may modify superadmin accounts.
async fn ensure_can_manage(state: &AppState, admin: &AuthUser, target: &User) -> AppResult<()> {
    if admin.role == ROLE_SUPERADMIN {
        return Ok(());
    }
    let target_role = RoleRepo::resolve_name(&state.pool, target.role_id).await?;
    if target_role == ROLE_SUPERADMIN {
        return Err(AppError::forbidden("Only a superadmin can modify this account"));
    }
    Ok(())
}

fn hash_new_password(password: &str) -> AppResult<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    hash_password(password).map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}
