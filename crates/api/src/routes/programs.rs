//! Route definitions for `/api/admin/programs`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::programs;
use crate::state::AppState;

/// Routes mounted at `/programs`. Requires the programs section.
///
/// ```text
/// GET    /                               -> list
/// POST   /                               -> create
/// GET    /{id}                           -> get (with projects)
/// PUT    /{id}                           -> update
/// DELETE /{id}                           -> delete
/// GET    /{id}/projects                  -> list_projects
/// POST   /{id}/projects                  -> create_project
/// PUT    /{id}/projects/{project_id}     -> update_project
/// DELETE /{id}/projects/{project_id}     -> delete_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(programs::list).post(programs::create))
        .route(
            "/{id}",
            get(programs::get)
                .put(programs::update)
                .delete(programs::delete),
        )
        .route(
            "/{id}/projects",
            get(programs::list_projects).post(programs::create_project),
        )
        .route(
            "/{id}/projects/{project_id}",
            put(programs::update_project).delete(programs::delete_project),
        )
}
