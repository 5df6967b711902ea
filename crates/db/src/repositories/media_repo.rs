//! Repository for the `media_files` table.

use careline_core::pagination::PageRequest;
use careline_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::{CreateMediaFile, MediaFile};

const COLUMNS: &str = "id, original_name, stored_path, url, content_type, kind, size_bytes, \
                        folder, uploaded_by, created_at, updated_at";

/// Binds: `$1` folder, `$2` kind.
const FILTER: &str = "($1::TEXT IS NULL OR folder = $1) AND ($2::TEXT IS NULL OR kind = $2)";

/// Metadata for files written to upload storage.
pub struct MediaRepo;

impl MediaRepo {
    pub async fn create(pool: &PgPool, input: &CreateMediaFile) -> Result<MediaFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_files
                (original_name, stored_path, url, content_type, kind, size_bytes, folder,
                 uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(&input.original_name)
            .bind(&input.stored_path)
            .bind(&input.url)
            .bind(&input.content_type)
            .bind(&input.kind)
            .bind(input.size_bytes)
            .bind(&input.folder)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_files WHERE id = $1");
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of uploads, newest first.
    pub async fn list(
        pool: &PgPool,
        folder: Option<&str>,
        kind: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<MediaFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_files WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(folder)
            .bind(kind)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        folder: Option<&str>,
        kind: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM media_files WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(folder)
            .bind(kind)
            .fetch_one(pool)
            .await
    }

    /// Delete the row and hand it back so the caller can remove the file.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<MediaFile>, sqlx::Error> {
        let query = format!("DELETE FROM media_files WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
