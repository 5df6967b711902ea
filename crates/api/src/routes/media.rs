//! Route definitions for `/api/admin/media`.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Room for multipart boundaries and the `folder` field on top of the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/media`. Requires the media section.
///
/// The body limit is raised to the configured upload ceiling so the handler,
/// not the extractor, reports oversized files.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> upload (multipart: file, folder?)
/// GET    /{id}    -> get
/// DELETE /{id}    -> delete
/// ```
pub fn router(max_upload_bytes: u64) -> Router<AppState> {
    let limit = usize::try_from(max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(media::list).post(media::upload))
        .route("/{id}", get(media::get).delete(media::delete))
        .layer(DefaultBodyLimit::max(limit))
}
