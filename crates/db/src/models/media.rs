//! Uploaded media file metadata.

use careline_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `media_files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaFile {
    pub id: DbId,
    pub original_name: String,
    /// Path relative to the upload root, always `/`-separated.
    pub stored_path: String,
    pub url: String,
    pub content_type: String,
    pub kind: String,
    pub size_bytes: i64,
    pub folder: String,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a stored upload.
#[derive(Debug, Clone)]
pub struct CreateMediaFile {
    pub original_name: String,
    pub stored_path: String,
    pub url: String,
    pub content_type: String,
    pub kind: String,
    pub size_bytes: i64,
    pub folder: String,
    pub uploaded_by: Option<DbId>,
}
