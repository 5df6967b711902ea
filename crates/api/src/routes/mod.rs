pub mod appointments;
pub mod auth;
pub mod bank_options;
pub mod bookings;
pub mod contacts;
pub mod dashboard;
pub mod footer;
pub mod gallery;
pub mod health;
pub mod media;
pub mod programs;
pub mod public;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/public` route tree. No authentication.
///
/// ```text
/// /bookings                                 submit booking (POST)
/// /contacts                                 submit contact message (POST)
/// /programs                                 published programs
/// /programs/{slug}                          one program with its projects
/// /bank-options                             active donation accounts
/// /gallery                                  published gallery items
/// /gallery/categories                       gallery categories
/// /footer                                   footer settings
/// ```
pub fn public_routes() -> Router<AppState> {
    public::router()
}

/// Build the `/api/admin` route tree.
///
/// Every route except login and refresh requires a valid session; section
/// gating is enforced by the handler extractors.
///
/// ```text
/// /auth/login                               login (public)
/// /auth/refresh                             refresh (public)
/// /auth/logout                              logout
/// /auth/session                             current user and menu
///
/// /navigation                               role-gated sidebar
/// /dashboard/badges                         sidebar badge counts
/// /dashboard/stats                          per-status totals
///
/// /bookings                                 list, manual entry
/// /bookings/{id}                            get, update, delete
/// /bookings/{id}/status                     status change + confirm flow (PUT)
/// /bookings/{id}/appointment                retry appointment creation (POST)
///
/// /appointments                             list, create
/// /appointments/conflicts                   slot conflict preview
/// /appointments/{id}                        get, update, delete
/// /appointments/{id}/status                 status change (PUT)
///
/// /contacts                                 list
/// /contacts/{id}                            get, delete
/// /contacts/{id}/status                     status change (PUT)
///
/// /programs                                 list, create
/// /programs/{id}                            get, update, delete
/// /programs/{id}/projects                   list, create
/// /programs/{id}/projects/{project_id}      update, delete
///
/// /bank-options                             list, create
/// /bank-options/{id}                        get, update, delete
///
/// /gallery/categories                       list, create
/// /gallery/categories/{id}                  update, delete
/// /gallery/items                            list, create
/// /gallery/items/{id}                       get, update, delete
///
/// /footer                                   get, update
///
/// /media                                    list, upload (multipart)
/// /media/{id}                               get, delete
///
/// /users                                    list, create
/// /users/{id}                               get, update, deactivate
/// /users/{id}/reset-password                reset password (POST)
/// ```
pub fn admin_routes(max_upload_bytes: u64) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route("/navigation", get(handlers::navigation::get))
        .nest("/dashboard", dashboard::router())
        .nest("/bookings", bookings::router())
        .nest("/appointments", appointments::router())
        .nest("/contacts", contacts::router())
        .nest("/programs", programs::router())
        .nest("/bank-options", bank_options::router())
        .nest("/gallery", gallery::router())
        .nest("/footer", footer::router())
        .nest("/media", media::router(max_upload_bytes))
        .nest("/users", users::router())
}
