//! Role-gated admin sidebar.

use axum::Json;
use careline_core::navigation::{menu_for_role, MenuItem};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct Navigation {
    pub role: String,
    pub menu: Vec<MenuItem>,
}

/// GET /api/admin/navigation
pub async fn get(user: AuthUser) -> AppResult<Json<ApiResponse<Navigation>>> {
    let menu = menu_for_role(&user.role);
    Ok(Json(ApiResponse::ok(Navigation {
        role: user.role,
        menu,
    })))
}
