//! Periodic removal of expired or revoked refresh-token sessions.

use std::time::Duration;

use careline_db::repositories::SessionRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run the session cleanup loop every `interval` until `cancel` fires.
///
/// The first tick fires immediately, so a restart also clears the backlog.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Session cleanup job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session cleanup job stopping");
                break;
            }
            _ = ticker.tick() => {
                match SessionRepo::cleanup_expired(&pool).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session cleanup: removed stale sessions");
                    }
                    Ok(_) => tracing::debug!("Session cleanup: nothing to remove"),
                    Err(e) => {
                        tracing::error!(error = %e, "Session cleanup: query failed");
                    }
                }
            }
        }
    }
}
