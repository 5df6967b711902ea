//! Upload classification and storage-path rules for the media library.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::error::CoreError;

/// Default upload size ceiling (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Folder used when the client does not name one.
pub const DEFAULT_FOLDER: &str = "general";

/// Broad media kind; gallery items only accept `image` and `video`.
pub const KIND_IMAGE: &str = "image";
pub const KIND_VIDEO: &str = "video";
pub const KIND_DOCUMENT: &str = "document";

/// Valid gallery media types.
pub const VALID_GALLERY_MEDIA_TYPES: &[&str] = &[KIND_IMAGE, KIND_VIDEO];

/// `(extension, content type, kind)` for every accepted upload.
const ALLOWED_TYPES: &[(&str, &str, &str)] = &[
    ("jpg", "image/jpeg", KIND_IMAGE),
    ("jpeg", "image/jpeg", KIND_IMAGE),
    ("png", "image/png", KIND_IMAGE),
    ("webp", "image/webp", KIND_IMAGE),
    ("gif", "image/gif", KIND_IMAGE),
    ("mp4", "video/mp4", KIND_VIDEO),
    ("webm", "video/webm", KIND_VIDEO),
    ("pdf", "application/pdf", KIND_DOCUMENT),
];

static FOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:[-_][a-z0-9]+)*$").expect("valid regex"));

/// Accepted upload details derived from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadType {
    pub extension: &'static str,
    pub content_type: &'static str,
    pub kind: &'static str,
}

/// Classify an upload by its file extension (case-insensitive).
pub fn classify_upload(filename: &str) -> Result<UploadType, CoreError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    ALLOWED_TYPES
        .iter()
        .find(|(e, _, _)| *e == ext)
        .map(|&(extension, content_type, kind)| UploadType {
            extension,
            content_type,
            kind,
        })
        .ok_or_else(|| {
            let allowed: Vec<&str> = ALLOWED_TYPES.iter().map(|(e, _, _)| *e).collect();
            CoreError::Validation(format!(
                "Unsupported file type '.{ext}'. Allowed: {}",
                allowed.join(", ")
            ))
        })
}

/// Validate an upload's name and size against `max_bytes`.
pub fn validate_upload(filename: &str, size: u64, max_bytes: u64) -> Result<UploadType, CoreError> {
    let upload = classify_upload(filename)?;
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "File is too large ({size} bytes). Maximum is {max_bytes} bytes"
        )));
    }
    Ok(upload)
}

/// Validate a storage folder name. Only lowercase slug segments are allowed,
/// which rules out separators and `..`.
pub fn validate_folder(folder: &str) -> Result<(), CoreError> {
    if folder.len() > 40 || !FOLDER_RE.is_match(folder) {
        return Err(CoreError::Validation(format!(
            "Invalid folder '{folder}'. Use lowercase letters, digits, '-' or '_'"
        )));
    }
    Ok(())
}

pub fn validate_gallery_media_type(media_type: &str) -> Result<(), CoreError> {
    if VALID_GALLERY_MEDIA_TYPES.contains(&media_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid media_type '{media_type}'. Must be one of: {}",
            VALID_GALLERY_MEDIA_TYPES.join(", ")
        )))
    }
}

/// Relative storage path `folder/YYYY/MM/<unique>.<ext>`, always with `/`.
pub fn stored_relative_path(folder: &str, date: NaiveDate, unique: &str, ext: &str) -> String {
    format!(
        "{folder}/{:04}/{:02}/{unique}.{ext}",
        date.year(),
        date.month()
    )
}

/// Public URL for a stored file given the mount path (e.g. `/uploads`).
pub fn public_url(public_path: &str, relative: &str) -> String {
    format!("{}/{}", public_path.trim_end_matches('/'), relative)
}
