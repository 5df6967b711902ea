//! Route definitions for `/api/admin/bank-options`.

use axum::routing::get;
use axum::Router;

use crate::handlers::bank_options;
use crate::state::AppState;

/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bank_options::list).post(bank_options::create))
        .route(
            "/{id}",
            get(bank_options::get)
                .put(bank_options::update)
                .delete(bank_options::delete),
        )
}
