//! Repository for the `bookings` table.

use careline_core::booking::BookingStatus;
use careline_core::pagination::PageRequest;
use careline_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::booking::{Booking, BookingFilter, CreateBooking, UpdateBooking};
use crate::models::stats::StatusCount;
use crate::repositories::like_pattern;

const COLUMNS: &str = "id, full_name, email, phone, preferred_date, preferred_time, \
                        service_type, notes, status, appointment_id, admin_notes, \
                        confirmed_at, confirmed_by, created_at, updated_at";

/// Shared WHERE clause for [`BookingRepo::list`] and [`BookingRepo::count`].
/// Binds: `$1` status, `$2` search pattern, `$3` date_from, `$4` date_to.
const FILTER: &str = "($1::TEXT IS NULL OR status = $1) \
    AND ($2::TEXT IS NULL OR full_name ILIKE $2 OR email ILIKE $2 OR phone ILIKE $2) \
    AND ($3::DATE IS NULL OR preferred_date >= $3) \
    AND ($4::DATE IS NULL OR preferred_date <= $4)";

/// Booking requests from the public site.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new `pending` booking.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings
                (full_name, email, phone, preferred_date, preferred_time, service_type, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.preferred_date)
            .bind(input.preferred_time)
            .bind(&input.service_type)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of bookings, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &BookingFilter,
        page: PageRequest,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(like_pattern(filter.search.as_deref()))
            .bind(filter.date_from)
            .bind(filter.date_to)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Total rows matching `filter`, for pagination.
    pub async fn count(pool: &PgPool, filter: &BookingFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM bookings WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(like_pattern(filter.search.as_deref()))
            .bind(filter.date_from)
            .bind(filter.date_to)
            .fetch_one(pool)
            .await
    }

    /// Update booking details. Only non-`None` fields in `input` are
    /// applied; a `Some(None)` patch sets the column to NULL.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBooking,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET
                full_name = COALESCE($2, full_name),
                email = CASE WHEN $3 THEN $4 ELSE email END,
                phone = COALESCE($5, phone),
                preferred_date = COALESCE($6, preferred_date),
                preferred_time = COALESCE($7, preferred_time),
                service_type = COALESCE($8, service_type),
                notes = CASE WHEN $9 THEN $10 ELSE notes END,
                admin_notes = CASE WHEN $11 THEN $12 ELSE admin_notes END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(input.email.is_some())
            .bind(input.email.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.phone)
            .bind(input.preferred_date)
            .bind(input.preferred_time)
            .bind(&input.service_type)
            .bind(input.notes.is_some())
            .bind(input.notes.as_ref().and_then(|v| v.as_deref()))
            .bind(input.admin_notes.is_some())
            .bind(input.admin_notes.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Move a booking from `from` to `to`.
    ///
    /// The row is only updated while it is still in `from`, so two admins
    /// racing on the same booking cannot both win. Confirming also stamps
    /// `confirmed_at` and `confirmed_by`. Returns `None` when the booking is
    /// missing or its status changed underneath us.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: BookingStatus,
        to: BookingStatus,
        actor: Option<DbId>,
        admin_notes: Option<&str>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET
                status = $3::TEXT,
                confirmed_at = CASE WHEN $3::TEXT = 'confirmed' THEN NOW() ELSE confirmed_at END,
                confirmed_by = CASE WHEN $3::TEXT = 'confirmed' THEN $4::BIGINT ELSE confirmed_by END,
                admin_notes = COALESCE($5, admin_notes)
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(actor)
            .bind(admin_notes)
            .fetch_optional(pool)
            .await
    }

    /// Point a booking at its appointment. Runs inside the caller's transaction
    /// when given one.
    pub async fn link_appointment<'e>(
        executor: impl PgExecutor<'e>,
        booking_id: DbId,
        appointment_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE bookings SET appointment_id = $2 WHERE id = $1")
            .bind(booking_id)
            .bind(appointment_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Row counts grouped by status (dashboard stats and badges).
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM bookings GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}
