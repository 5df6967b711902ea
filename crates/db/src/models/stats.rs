//! Aggregate rows used by the dashboard.

use serde::Serialize;
use sqlx::FromRow;

/// Row count for one status value.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
