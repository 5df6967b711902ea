//! Admin handlers for gallery categories and items.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use careline_core::media::validate_gallery_media_type;
use careline_core::pagination::PageInfo;
use careline_core::types::DbId;
use careline_core::validation::{require, validate_optional_url, validate_slug, validate_url};
use careline_db::models::gallery::{
    CreateGalleryCategory, CreateGalleryItem, GalleryCategory, GalleryItem, GalleryItemFilter,
    UpdateGalleryCategory, UpdateGalleryItem,
};
use careline_db::repositories::{GalleryCategoryRepo, GalleryItemRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireGallery;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ItemListParams {
    pub category_id: Option<DbId>,
    pub published: Option<bool>,
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /api/admin/gallery/categories
pub async fn list_categories(
    State(state): State<AppState>,
    RequireGallery(_user): RequireGallery,
) -> AppResult<Json<ApiResponse<Vec<GalleryCategory>>>> {
    let categories = GalleryCategoryRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// POST /api/admin/gallery/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireGallery(user): RequireGallery,
    AppJson(input): AppJson<CreateGalleryCategory>,
) -> AppResult<(StatusCode, Json<ApiResponse<GalleryCategory>>)> {
    validate_slug("slug", &input.slug)?;
    require("name_en", &input.name_en)?;

    let category = GalleryCategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, user_id = user.user_id, "Gallery category created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// PUT /api/admin/gallery/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireGallery(user): RequireGallery,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateGalleryCategory>,
) -> AppResult<Json<ApiResponse<GalleryCategory>>> {
    if let Some(slug) = &input.slug {
        validate_slug("slug", slug)?;
    }
    if let Some(name) = &input.name_en {
        require("name_en", name)?;
    }

    let category = GalleryCategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Gallery category", id))?;
    tracing::info!(category_id = id, user_id = user.user_id, "Gallery category updated");
    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/admin/gallery/categories/{id}
///
/// Items in the category are kept and become uncategorised.
pub async fn delete_category(
    State(state): State<AppState>,
    RequireGallery(user): RequireGallery,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if GalleryCategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, user_id = user.user_id, "Gallery category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Gallery category", id))
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// GET /api/admin/gallery/items
pub async fn list_items(
    State(state): State<AppState>,
    RequireGallery(_user): RequireGallery,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<ItemListParams>,
) -> AppResult<Json<ApiResponse<Vec<GalleryItem>>>> {
    let filter = GalleryItemFilter {
        category_id: params.category_id,
        category_slug: None,
        published_only: params.published.unwrap_or(false),
    };
    let page = page.to_request();

    let items = GalleryItemRepo::list(&state.pool, &filter, page).await?;
    let total = GalleryItemRepo::count(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::paginated(items, PageInfo::new(page, total))))
}

/// POST /api/admin/gallery/items
pub async fn create_item(
    State(state): State<AppState>,
    RequireGallery(user): RequireGallery,
    AppJson(input): AppJson<CreateGalleryItem>,
) -> AppResult<(StatusCode, Json<ApiResponse<GalleryItem>>)> {
    require("media_url", &input.media_url)?;
    validate_url("media_url", &input.media_url)?;
    validate_optional_url("thumbnail_url", input.thumbnail_url.as_deref())?;
    if let Some(media_type) = &input.media_type {
        validate_gallery_media_type(media_type)?;
    }

    let item = GalleryItemRepo::create(&state.pool, &input).await?;
    tracing::info!(item_id = item.id, user_id = user.user_id, "Gallery item created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(item))))
}

/// GET /api/admin/gallery/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    RequireGallery(_user): RequireGallery,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<GalleryItem>>> {
    let item = GalleryItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Gallery item", id))?;
    Ok(Json(ApiResponse::ok(item)))
}

/// PUT /api/admin/gallery/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    RequireGallery(user): RequireGallery,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateGalleryItem>,
) -> AppResult<Json<ApiResponse<GalleryItem>>> {
    if let Some(url) = &input.media_url {
        validate_url("media_url", url)?;
    }
    validate_optional_url("thumbnail_url", input.thumbnail_url.as_deref())?;
    if let Some(media_type) = &input.media_type {
        validate_gallery_media_type(media_type)?;
    }

    let item = GalleryItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Gallery item", id))?;
    tracing::info!(item_id = id, user_id = user.user_id, "Gallery item updated");
    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /api/admin/gallery/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    RequireGallery(user): RequireGallery,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if GalleryItemRepo::delete(&state.pool, id).await? {
        tracing::info!(item_id = id, user_id = user.user_id, "Gallery item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Gallery item", id))
    }
}
