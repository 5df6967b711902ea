//! Route definitions for `/api/admin/contacts`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::contacts;
use crate::state::AppState;

/// ```text
/// GET    /               -> list
/// GET    /{id}           -> get
/// DELETE /{id}           -> delete
/// PUT    /{id}/status    -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contacts::list))
        .route("/{id}", get(contacts::get).delete(contacts::delete))
        .route("/{id}/status", put(contacts::update_status))
}
