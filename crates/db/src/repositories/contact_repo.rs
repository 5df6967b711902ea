//! Repository for the `contacts` table.

use careline_core::contact::ContactStatus;
use careline_core::pagination::PageRequest;
use careline_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact::{Contact, ContactFilter, CreateContact};
use crate::models::stats::StatusCount;
use crate::repositories::like_pattern;

const COLUMNS: &str =
    "id, full_name, email, phone, subject, message, status, created_at, updated_at";

/// Binds: `$1` status, `$2` search pattern.
const FILTER: &str = "($1::TEXT IS NULL OR status = $1) \
    AND ($2::TEXT IS NULL OR full_name ILIKE $2 OR email ILIKE $2 \
         OR subject ILIKE $2 OR message ILIKE $2)";

/// Contact-form inbox.
pub struct ContactRepo;

impl ContactRepo {
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (full_name, email, phone, subject, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.subject)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of messages, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contacts WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(like_pattern(filter.search.as_deref()))
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ContactFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM contacts WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(like_pattern(filter.search.as_deref()))
            .fetch_one(pool)
            .await
    }

    /// Move a message from `from` to `to`. Returns `None` when the row is
    /// missing or no longer in `from`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: ContactStatus,
        to: ContactStatus,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM contacts GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}
