//! Admin handlers for programs and their nested projects.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use careline_core::types::DbId;
use careline_core::validation::{require, validate_optional_url, validate_slug};
use careline_db::models::program::{
    CreateProgram, CreateProgramProject, Program, ProgramProject, ProgramWithProjects,
    UpdateProgram, UpdateProgramProject,
};
use careline_db::repositories::{ProgramProjectRepo, ProgramRepo};
use serde::Deserialize;
use sqlx::PgPool;

use super::filter_param;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequirePrograms;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProgramListParams {
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

/// GET /api/admin/programs
///
/// Drafts included, in display order.
pub async fn list(
    State(state): State<AppState>,
    RequirePrograms(_user): RequirePrograms,
    AppQuery(params): AppQuery<ProgramListParams>,
) -> AppResult<Json<ApiResponse<Vec<Program>>>> {
    let programs =
        ProgramRepo::list(&state.pool, filter_param(params.category.as_deref()), false).await?;
    Ok(Json(ApiResponse::ok(programs)))
}

/// POST /api/admin/programs
pub async fn create(
    State(state): State<AppState>,
    RequirePrograms(user): RequirePrograms,
    AppJson(input): AppJson<CreateProgram>,
) -> AppResult<(StatusCode, Json<ApiResponse<Program>>)> {
    validate_slug("slug", &input.slug)?;
    validate_slug("category_id", &input.category_id)?;
    require("title_en", &input.title_en)?;
    validate_optional_url("image_url", input.image_url.as_deref())?;
    validate_optional_url("thumbnail_url", input.thumbnail_url.as_deref())?;

    let program = ProgramRepo::create(&state.pool, &input).await?;
    tracing::info!(program_id = program.id, slug = %program.slug, user_id = user.user_id, "Program created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(program))))
}

/// GET /api/admin/programs/{id}
pub async fn get(
    State(state): State<AppState>,
    RequirePrograms(_user): RequirePrograms,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<ProgramWithProjects>>> {
    let program = find_or_404(&state.pool, id).await?;
    let projects = ProgramProjectRepo::list_for_program(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok(ProgramWithProjects { program, projects })))
}

/// PUT /api/admin/programs/{id}
pub async fn update(
    State(state): State<AppState>,
    RequirePrograms(user): RequirePrograms,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProgram>,
) -> AppResult<Json<ApiResponse<Program>>> {
    if let Some(slug) = &input.slug {
        validate_slug("slug", slug)?;
    }
    if let Some(category) = &input.category_id {
        validate_slug("category_id", category)?;
    }
    if let Some(title) = &input.title_en {
        require("title_en", title)?;
    }
    validate_optional_url("image_url", input.image_url.as_deref())?;
    validate_optional_url("thumbnail_url", input.thumbnail_url.as_deref())?;

    let program = ProgramRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Program", id))?;
    tracing::info!(program_id = id, user_id = user.user_id, "Program updated");
    Ok(Json(ApiResponse::ok(program)))
}

/// DELETE /api/admin/programs/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequirePrograms(user): RequirePrograms,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if ProgramRepo::delete(&state.pool, id).await? {
        tracing::info!(program_id = id, user_id = user.user_id, "Program deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Program", id))
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// GET /api/admin/programs/{id}/projects
pub async fn list_projects(
    State(state): State<AppState>,
    RequirePrograms(_user): RequirePrograms,
    AppPath(program_id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Vec<ProgramProject>>>> {
    find_or_404(&state.pool, program_id).await?;
    let projects = ProgramProjectRepo::list_for_program(&state.pool, program_id).await?;
    Ok(Json(ApiResponse::ok(projects)))
}

/// POST /api/admin/programs/{id}/projects
pub async fn create_project(
    State(state): State<AppState>,
    RequirePrograms(user): RequirePrograms,
    AppPath(program_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateProgramProject>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProgramProject>>)> {
    require("title_en", &input.title_en)?;
    validate_optional_url("image_url", input.image_url.as_deref())?;
    find_or_404(&state.pool, program_id).await?;

    let project = ProgramProjectRepo::create(&state.pool, program_id, &input).await?;
    tracing::info!(program_id, project_id = project.id, user_id = user.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(project))))
}

/// PUT /api/admin/programs/{id}/projects/{project_id}
pub async fn update_project(
    State(state): State<AppState>,
    RequirePrograms(user): RequirePrograms,
    AppPath((program_id, project_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateProgramProject>,
) -> AppResult<Json<ApiResponse<ProgramProject>>> {
    if let Some(title) = &input.title_en {
        require("title_en", title)?;
    }
    validate_optional_url("image_url", input.image_url.as_deref())?;

    let project = ProgramProjectRepo::update(&state.pool, program_id, project_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Project", project_id))?;
    tracing::info!(program_id, project_id, user_id = user.user_id, "Project updated");
    Ok(Json(ApiResponse::ok(project)))
}

/// DELETE /api/admin/programs/{id}/projects/{project_id}
pub async fn delete_project(
    State(state): State<AppState>,
    RequirePrograms(user): RequirePrograms,
    AppPath((program_id, project_id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if ProgramProjectRepo::delete(&state.pool, program_id, project_id).await? {
        tracing::info!(program_id, project_id, user_id = user.user_id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Project", project_id))
    }
}

async fn find_or_404(pool: &PgPool, id: DbId) -> AppResult<Program> {
    ProgramRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Program", id))
}
