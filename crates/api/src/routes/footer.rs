//! Route definitions for `/api/admin/footer`.

use axum::routing::get;
use axum::Router;

use crate::handlers::footer;
use crate::state::AppState;

/// ```text
/// GET /  -> get
/// PUT /  -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(footer::get).put(footer::update))
}
