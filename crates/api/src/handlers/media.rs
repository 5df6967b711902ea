//! Media library: multipart uploads, listing and deletion.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use careline_core::media::{
    public_url, stored_relative_path, validate_folder, validate_upload, DEFAULT_FOLDER,
};
use careline_core::pagination::PageInfo;
use careline_core::types::DbId;
use careline_db::models::media::{CreateMediaFile, MediaFile};
use careline_db::repositories::MediaRepo;
use chrono::Utc;
use serde::Deserialize;

use super::filter_param;
use crate::error::{AppError, AppResult};
use crate::extract::{AppMultipart, AppPath, AppQuery};
use crate::middleware::rbac::RequireMedia;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MediaListParams {
    pub folder: Option<String>,
    pub kind: Option<String>,
}

/// POST /api/admin/media
///
/// Multipart form with a required `file` field and an optional `folder`
/// (default `general`). The file is written under
/// `<folder>/<year>/<month>/<uuid>.<ext>` and served from the upload path.
pub async fn upload(
    State(state): State<AppState>,
    RequireMedia(user): RequireMedia,
    AppMultipart(mut multipart): AppMultipart,
) -> AppResult<(StatusCode, Json<ApiResponse<MediaFile>>)> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some((filename, data.to_vec()));
            }
            "folder" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                folder = Some(text.trim().to_string()).filter(|f| !f.is_empty());
            }
            _ => {}
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let folder = folder.unwrap_or_else(|| DEFAULT_FOLDER.to_string());
    validate_folder(&folder)?;
    let upload = validate_upload(&filename, data.len() as u64, state.config.upload.max_bytes)?;

    let unique = uuid::Uuid::new_v4().simple().to_string();
    let relative = stored_relative_path(&folder, Utc::now().date_naive(), &unique, upload.extension);
    state.media_store.save(&relative, &data).await?;

    let input = CreateMediaFile {
        original_name: filename,
        url: public_url(&state.config.upload.public_path, &relative),
        stored_path: relative.clone(),
        content_type: upload.content_type.to_string(),
        kind: upload.kind.to_string(),
        size_bytes: data.len() as i64,
        folder,
        uploaded_by: Some(user.user_id),
    };

    let media = match MediaRepo::create(&state.pool, &input).await {
        Ok(media) => media,
        Err(e) => {
            // Do not leave an orphaned file behind.
            if let Err(cleanup) = state.media_store.delete(&relative).await {
                tracing::warn!(path = %relative, error = %cleanup, "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        media_id = media.id,
        user_id = user.user_id,
        path = %media.stored_path,
        size = media.size_bytes,
        "Media uploaded"
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(media))))
}

/// GET /api/admin/media
pub async fn list(
    State(state): State<AppState>,
    RequireMedia(_user): RequireMedia,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<MediaListParams>,
) -> AppResult<Json<ApiResponse<Vec<MediaFile>>>> {
    let folder = filter_param(params.folder.as_deref());
    let kind = filter_param(params.kind.as_deref());
    let page = page.to_request();

    let files = MediaRepo::list(&state.pool, folder, kind, page).await?;
    let total = MediaRepo::count(&state.pool, folder, kind).await?;
    Ok(Json(ApiResponse::paginated(files, PageInfo::new(page, total))))
}

/// GET /api/admin/media/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireMedia(_user): RequireMedia,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<MediaFile>>> {
    let media = MediaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Media file", id))?;
    Ok(Json(ApiResponse::ok(media)))
}

/// DELETE /api/admin/media/{id}
///
/// Removes the record first, then the file. A file that is already gone
/// is reported as a warning rather than an error.
pub async fn delete(
    State(state): State<AppState>,
    RequireMedia(user): RequireMedia,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<MediaFile>>> {
    let media = MediaRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Media file", id))?;

    let warning = match state.media_store.delete(&media.stored_path).await {
        Ok(true) => None,
        Ok(false) => Some("The stored file was already missing".to_string()),
        Err(e) => {
            tracing::error!(media_id = id, path = %media.stored_path, error = %e, "Failed to remove media file");
            Some("The record was deleted but the stored file could not be removed".to_string())
        }
    };

    tracing::info!(media_id = id, user_id = user.user_id, "Media deleted");
    Ok(Json(ApiResponse::with_warning(media, warning)))
}
