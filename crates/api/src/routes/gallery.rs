//! Route definitions for `/api/admin/gallery`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// ```text
/// GET    /categories         -> list_categories
/// POST   /categories         -> create_category
/// PUT    /categories/{id}    -> update_category
/// DELETE /categories/{id}    -> delete_category
/// GET    /items              -> list_items
/// POST   /items              -> create_item
/// GET    /items/{id}         -> get_item
/// PUT    /items/{id}         -> update_item
/// DELETE /items/{id}         -> delete_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(gallery::list_categories).post(gallery::create_category),
        )
        .route(
            "/categories/{id}",
            put(gallery::update_category).delete(gallery::delete_category),
        )
        .route("/items", get(gallery::list_items).post(gallery::create_item))
        .route(
            "/items/{id}",
            get(gallery::get_item)
                .put(gallery::update_item)
                .delete(gallery::delete_item),
        )
}
