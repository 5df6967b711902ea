use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::MediaStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: careline_db::DbPool,
    /// Server configuration (JWT keys, cookie flags, upload limits).
    pub config: Arc<ServerConfig>,
    /// Backing store for uploaded media.
    pub media_store: Arc<dyn MediaStore>,
}
