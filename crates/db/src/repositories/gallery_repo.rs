//! Repositories for `gallery_categories` and `gallery_items`.

use careline_core::media::KIND_IMAGE;
use careline_core::pagination::PageRequest;
use careline_core::types::DbId;
use sqlx::PgPool;

use crate::models::gallery::{
    CreateGalleryCategory, CreateGalleryItem, GalleryCategory, GalleryItem, GalleryItemFilter,
    UpdateGalleryCategory, UpdateGalleryItem,
};

const CATEGORY_COLUMNS: &str = "id, slug, name_en, name_fr, sort_order, created_at, updated_at";

const ITEM_COLUMNS: &str = "i.id, i.category_id, i.title_en, i.title_fr, i.media_url, \
                             i.thumbnail_url, i.media_type, i.sort_order, i.is_published, \
                             i.created_at, i.updated_at";

/// Binds: `$1` category id, `$2` category slug, `$3` published only.
const ITEM_FILTER: &str = "($1::BIGINT IS NULL OR i.category_id = $1) \
    AND ($2::TEXT IS NULL OR c.slug = $2) \
    AND (NOT $3 OR i.is_published)";

pub struct GalleryCategoryRepo;

impl GalleryCategoryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryCategory,
    ) -> Result<GalleryCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_categories (slug, name_en, name_fr, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryCategory>(&query)
            .bind(&input.slug)
            .bind(&input.name_en)
            .bind(input.name_fr.as_deref().unwrap_or(""))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GalleryCategory>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM gallery_categories WHERE id = $1");
        sqlx::query_as::<_, GalleryCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<GalleryCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM gallery_categories ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, GalleryCategory>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryCategory,
    ) -> Result<Option<GalleryCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_categories SET
                slug = COALESCE($2, slug),
                name_en = COALESCE($3, name_en),
                name_fr = COALESCE($4, name_fr),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryCategory>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.name_en)
            .bind(&input.name_fr)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Its items stay and become uncategorised.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct GalleryItemRepo;

impl GalleryItemRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryItem,
    ) -> Result<GalleryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_items AS i
                (category_id, title_en, title_fr, media_url, thumbnail_url, media_type,
                 sort_order, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(input.category_id)
            .bind(input.title_en.as_deref().unwrap_or(""))
            .bind(input.title_fr.as_deref().unwrap_or(""))
            .bind(&input.media_url)
            .bind(&input.thumbnail_url)
            .bind(input.media_type.as_deref().unwrap_or(KIND_IMAGE))
            .bind(input.sort_order.unwrap_or(0))
            .bind(input.is_published.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM gallery_items i WHERE i.id = $1");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of items in display order.
    pub async fn list(
        pool: &PgPool,
        filter: &GalleryItemFilter,
        page: PageRequest,
    ) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM gallery_items i
             LEFT JOIN gallery_categories c ON c.id = i.category_id
             WHERE {ITEM_FILTER}
             ORDER BY i.sort_order ASC, i.created_at DESC, i.id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(filter.category_id)
            .bind(&filter.category_slug)
            .bind(filter.published_only)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &GalleryItemFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM gallery_items i
             LEFT JOIN gallery_categories c ON c.id = i.category_id
             WHERE {ITEM_FILTER}"
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.category_id)
            .bind(&filter.category_slug)
            .bind(filter.published_only)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryItem,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_items AS i SET
                category_id = COALESCE($2, category_id),
                title_en = COALESCE($3, title_en),
                title_fr = COALESCE($4, title_fr),
                media_url = COALESCE($5, media_url),
                thumbnail_url = COALESCE($6, thumbnail_url),
                media_type = COALESCE($7, media_type),
                sort_order = COALESCE($8, sort_order),
                is_published = COALESCE($9, is_published)
             WHERE i.id = $1
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.title_en)
            .bind(&input.title_fr)
            .bind(&input.media_url)
            .bind(&input.thumbnail_url)
            .bind(&input.media_type)
            .bind(input.sort_order)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
