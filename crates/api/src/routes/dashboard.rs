//! Route definitions for `/api/admin/dashboard`.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// ```text
/// GET /badges  -> badges
/// GET /stats   -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/badges", get(dashboard::badges))
        .route("/stats", get(dashboard::stats))
}
