//! Handlers for `/api/admin/auth` (login, refresh, logout, session).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::AppendHeaders;
use axum::Json;
use chrono::Utc;
use careline_core::navigation::{menu_for_role, MenuItem};
use careline_core::types::DbId;
use careline_db::models::session::CreateSession;
use careline_db::models::user::User;
use careline_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::cookies::{
    clear_cookie, read_cookie, set_cookie, REFRESH_COOKIE, REFRESH_COOKIE_PATH, SESSION_COOKIE,
};
use crate::error::{validate_request, AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

type AuthCookies = AppendHeaders<[(HeaderName, String); 2]>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`. `login` accepts a username or an email.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "username", alias = "email")]
    #[validate(length(min = 1, message = "login is required"))]
    pub login: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`. Cookie clients may omit it.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
}

impl UserInfo {
    fn new(user: &User, role: &str) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: role.to_string(),
        }
    }
}

/// `GET /auth/session` payload: who is logged in and what they may open.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub user: UserInfo,
    pub menu: Vec<MenuItem>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/admin/auth/login
///
/// Authenticate with username (or email) and password. Returns tokens in the
/// body and sets the session and refresh cookies.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<(AuthCookies, Json<ApiResponse<AuthResponse>>)> {
    validate_request(&input)?;

    let user = UserRepo::find_by_login(&state.pool, input.login.trim())
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::forbidden(
                "Account is temporarily locked. Try again later.",
            ));
        }
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let failed = UserRepo::increment_failed_login(&state.pool, user.id).await?;
        if failed >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = user.id, failed, "Account locked after failed logins");
        }
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    let response = create_auth_response(&state, &user, &role_name, &headers).await?;
    tracing::info!(user_id = user.id, role = %role_name, "User logged in");

    Ok((auth_cookies(&state, &response), Json(ApiResponse::ok(response))))
}

/// POST /api/admin/auth/refresh
///
/// Exchange a refresh token (body or cookie) for a new token pair. The old
/// session is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<AppJson<RefreshRequest>>,
) -> AppResult<(AuthCookies, Json<ApiResponse<AuthResponse>>)> {
    let token = body
        .and_then(|AppJson(b)| b.refresh_token)
        .filter(|t| !t.is_empty())
        .or_else(|| read_cookie(&headers, REFRESH_COOKIE))
        .ok_or_else(|| AppError::unauthorized("Missing refresh token"))?;

    let token_hash = hash_refresh_token(&token);
    // Rotation: a refresh token is single-use.
    let session = SessionRepo::consume(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid or expired refresh token"))?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let response = create_auth_response(&state, &user, &role_name, &headers).await?;

    Ok((auth_cookies(&state, &response), Json(ApiResponse::ok(response))))
}

/// POST /api/admin/auth/logout
///
/// Revoke all sessions for the authenticated user and clear the cookies.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<(StatusCode, AuthCookies)> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");

    let secure = state.config.cookie_secure;
    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([
            (SET_COOKIE, clear_cookie(SESSION_COOKIE, "/", secure)),
            (
                SET_COOKIE,
                clear_cookie(REFRESH_COOKIE, REFRESH_COOKIE_PATH, secure),
            ),
        ]),
    ))
}

/// GET /api/admin/auth/session
///
/// The current user and their menu. Fails with 401 once the account is
/// deactivated, even if the access token has not expired yet.
pub async fn session(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<SessionInfo>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::unauthorized("Session is no longer valid"))?;

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(ApiResponse::ok(SessionInfo {
        menu: menu_for_role(&role_name),
        user: UserInfo::new(&user, &role_name),
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: &User,
    role: &str,
    headers: &HeaderMap,
) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at,
        user_agent: header_string(headers, "user-agent"),
        ip_address: header_string(headers, "x-forwarded-for")
            .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string())),
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: jwt.access_token_ttl_secs(),
        user: UserInfo::new(user, role),
    })
}

fn auth_cookies(state: &AppState, response: &AuthResponse) -> AuthCookies {
    let config = &state.config;
    AppendHeaders([
        (
            SET_COOKIE,
            set_cookie(
                SESSION_COOKIE,
                &response.access_token,
                "/",
                config.jwt.access_token_ttl_secs(),
                config.cookie_secure,
            ),
        ),
        (
            SET_COOKIE,
            set_cookie(
                REFRESH_COOKIE,
                &response.refresh_token,
                REFRESH_COOKIE_PATH,
                config.jwt.refresh_token_ttl_secs(),
                config.cookie_secure,
            ),
        ),
    ])
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.chars().take(255).collect())
}
