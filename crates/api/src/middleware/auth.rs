//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use careline_core::types::DbId;
use careline_db::repositories::RoleRepo;

use crate::auth::jwt::validate_token;
use crate::cookies::{read_cookie, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the access token.
///
/// The token is read from `Authorization: Bearer <token>` first and from the
/// `careline_session` cookie otherwise. The account is then re-checked in the
/// database: a deactivated user is rejected with 401 while their token is
/// still unexpired, and the role always comes from the current row, not from
/// the token.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// Current role name (e.g. `"admin"`, `"nurse"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            Some(header) => header
                .strip_prefix("Bearer ")
                .map(str::to_string)
                .ok_or_else(|| {
                    AppError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
                })?,
            None => read_cookie(&parts.headers, SESSION_COOKIE)
                .ok_or_else(|| AppError::unauthorized("Authentication required"))?,
        };

        let claims = validate_token(&token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let role = RoleRepo::active_role_of_user(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("Session is no longer valid"))?;
        if role != claims.role {
            tracing::debug!(
                user_id = claims.sub,
                token_role = %claims.role,
                role = %role,
                "Role changed since token was issued"
            );
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role,
        })
    }
}
