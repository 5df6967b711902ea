//! Route definitions for `/api/public`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{bookings, contacts, public};
use crate::state::AppState;

/// ```text
/// POST /bookings              -> bookings::submit
/// POST /contacts              -> contacts::submit
/// GET  /programs              -> list_programs
/// GET  /programs/{slug}       -> get_program
/// GET  /bank-options          -> list_bank_options
/// GET  /gallery               -> list_gallery
/// GET  /gallery/categories    -> list_gallery_categories
/// GET  /footer                -> get_footer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(bookings::submit))
        .route("/contacts", post(contacts::submit))
        .route("/programs", get(public::list_programs))
        .route("/programs/{slug}", get(public::get_program))
        .route("/bank-options", get(public::list_bank_options))
        .route("/gallery", get(public::list_gallery))
        .route("/gallery/categories", get(public::list_gallery_categories))
        .route("/footer", get(public::get_footer))
}
