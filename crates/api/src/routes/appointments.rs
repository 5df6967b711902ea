//! Route definitions for `/api/admin/appointments`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Routes mounted at `/appointments`. Requires the appointments section.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /conflicts      -> conflicts
/// GET    /{id}           -> get
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// PUT    /{id}/status    -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(appointments::list).post(appointments::create))
        .route("/conflicts", get(appointments::conflicts))
        .route(
            "/{id}",
            get(appointments::get)
                .put(appointments::update)
                .delete(appointments::delete),
        )
        .route("/{id}/status", put(appointments::update_status))
}
