//! Gallery category and item models.

use careline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `gallery_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryCategory {
    pub id: DbId,
    pub slug: String,
    pub name_en: String,
    pub name_fr: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGalleryCategory {
    pub slug: String,
    pub name_en: String,
    pub name_fr: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGalleryCategory {
    pub slug: Option<String>,
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub sort_order: Option<i32>,
}

/// A row from the `gallery_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryItem {
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub title_en: String,
    pub title_fr: String,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub media_type: String,
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGalleryItem {
    pub category_id: Option<DbId>,
    pub title_en: Option<String>,
    pub title_fr: Option<String>,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    /// Defaults to `image` if omitted.
    pub media_type: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGalleryItem {
    pub category_id: Option<DbId>,
    pub title_en: Option<String>,
    pub title_fr: Option<String>,
    pub media_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub media_type: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

/// Filters for gallery item listings.
#[derive(Debug, Clone, Default)]
pub struct GalleryItemFilter {
    pub category_id: Option<DbId>,
    /// Filter by the category's slug instead of its id (public site).
    pub category_slug: Option<String>,
    pub published_only: bool,
}
