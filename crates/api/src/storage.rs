//! Media file storage.
//!
//! Handlers only see the [`MediaStore`] trait; the server wires in a
//! [`LocalMediaStore`] rooted at `UPLOAD_DIR`, which `ServeDir` also serves.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The relative path is absolute or climbs out of the storage root.
    #[error("invalid storage path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Where uploaded bytes live. Paths are always relative and `/`-separated.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Write `bytes` at `relative`, creating parent directories.
    async fn save(&self, relative: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Remove the file at `relative`. Returns `false` when it was already gone.
    async fn delete(&self, relative: &str) -> Result<bool, StorageError>;
}

/// Filesystem-backed [`MediaStore`].
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(relative);
        let clean = !relative.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !clean {
            return Err(StorageError::InvalidPath(relative.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save(&self, relative: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(relative)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored media file");
        Ok(())
    }

    async fn delete(&self, relative: &str) -> Result<bool, StorageError> {
        let path = self.resolve(relative)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
