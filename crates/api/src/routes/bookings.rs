//! Route definitions for `/api/admin/bookings`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`. Requires the bookings section.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create (manual entry)
/// GET    /{id}                -> get
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// PUT    /{id}/status         -> update_status
/// POST   /{id}/appointment    -> schedule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::list).post(bookings::create))
        .route(
            "/{id}",
            get(bookings::get)
                .put(bookings::update)
                .delete(bookings::delete),
        )
        .route("/{id}/status", put(bookings::update_status))
        .route("/{id}/appointment", post(bookings::schedule))
}
