//! Repository for the `appointments` table.

use careline_core::appointment::{AppointmentStatus, DEFAULT_DURATION_MINUTES};
use careline_core::pagination::PageRequest;
use careline_core::types::DbId;
use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};

use crate::models::appointment::{
    Appointment, AppointmentFilter, CreateAppointment, UpdateAppointment,
};
use crate::models::stats::StatusCount;
use crate::repositories::{like_pattern, BookingRepo};

const COLUMNS: &str = "id, patient_name, patient_email, patient_phone, appointment_date, \
                        start_time, duration_minutes, service_type, status, booking_id, \
                        assigned_to, notes, created_by, created_at, updated_at";

/// Shared WHERE clause for [`AppointmentRepo::list`] and [`AppointmentRepo::count`].
/// Binds: `$1` status, `$2` exact date, `$3` date_from, `$4` date_to,
/// `$5` assignee, `$6` search pattern.
const FILTER: &str = "($1::TEXT IS NULL OR status = $1) \
    AND ($2::DATE IS NULL OR appointment_date = $2) \
    AND ($3::DATE IS NULL OR appointment_date >= $3) \
    AND ($4::DATE IS NULL OR appointment_date <= $4) \
    AND ($5::BIGINT IS NULL OR assigned_to = $5) \
    AND ($6::TEXT IS NULL OR patient_name ILIKE $6 OR patient_email ILIKE $6 \
         OR patient_phone ILIKE $6)";

/// Scheduled clinical visits.
pub struct AppointmentRepo;

impl AppointmentRepo {
    async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateAppointment,
        booking_id: Option<DbId>,
        created_by: Option<DbId>,
    ) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments
                (patient_name, patient_email, patient_phone, appointment_date, start_time,
                 duration_minutes, service_type, booking_id, assigned_to, notes, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(&input.patient_name)
            .bind(&input.patient_email)
            .bind(&input.patient_phone)
            .bind(input.appointment_date)
            .bind(input.start_time)
            .bind(input.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES))
            .bind(&input.service_type)
            .bind(booking_id)
            .bind(input.assigned_to)
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(executor)
            .await
    }

    /// Insert a stand-alone appointment in `scheduled` status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAppointment,
        created_by: Option<DbId>,
    ) -> Result<Appointment, sqlx::Error> {
        Self::insert(pool, input, None, created_by).await
    }

    /// Insert an appointment for `booking_id` and link the booking back to
    /// it, both in one transaction.
    pub async fn create_for_booking(
        pool: &PgPool,
        booking_id: DbId,
        input: &CreateAppointment,
        created_by: Option<DbId>,
    ) -> Result<Appointment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let appointment = Self::insert(&mut *tx, input, Some(booking_id), created_by).await?;
        if !BookingRepo::link_appointment(&mut *tx, booking_id, appointment.id).await? {
            return Err(sqlx::Error::RowNotFound);
        }

        tx.commit().await?;
        Ok(appointment)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_booking(
        pool: &PgPool,
        booking_id: DbId,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE booking_id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(booking_id)
            .fetch_optional(pool)
            .await
    }

    /// One page of appointments in calendar order.
    pub async fn list(
        pool: &PgPool,
        filter: &AppointmentFilter,
        page: PageRequest,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments WHERE {FILTER}
             ORDER BY appointment_date ASC, start_time ASC, id ASC
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.date)
            .bind(filter.date_from)
            .bind(filter.date_to)
            .bind(filter.assigned_to)
            .bind(like_pattern(filter.search.as_deref()))
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &AppointmentFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM appointments WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.date)
            .bind(filter.date_from)
            .bind(filter.date_to)
            .bind(filter.assigned_to)
            .bind(like_pattern(filter.search.as_deref()))
            .fetch_one(pool)
            .await
    }

    /// Update appointment details. Only non-`None` fields in `input` are
    /// applied; a `Some(None)` patch sets the column to NULL.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAppointment,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET
                patient_name = COALESCE($2, patient_name),
                patient_email = CASE WHEN $3 THEN $4 ELSE patient_email END,
                patient_phone = CASE WHEN $5 THEN $6 ELSE patient_phone END,
                appointment_date = COALESCE($7, appointment_date),
                start_time = COALESCE($8, start_time),
                duration_minutes = COALESCE($9, duration_minutes),
                service_type = COALESCE($10, service_type),
                assigned_to = CASE WHEN $11 THEN $12 ELSE assigned_to END,
                notes = CASE WHEN $13 THEN $14 ELSE notes END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(&input.patient_name)
            .bind(input.patient_email.is_some())
            .bind(input.patient_email.as_ref().and_then(|v| v.as_deref()))
            .bind(input.patient_phone.is_some())
            .bind(input.patient_phone.as_ref().and_then(|v| v.as_deref()))
            .bind(input.appointment_date)
            .bind(input.start_time)
            .bind(input.duration_minutes)
            .bind(&input.service_type)
            .bind(input.assigned_to.is_some())
            .bind(input.assigned_to.flatten())
            .bind(input.notes.is_some())
            .bind(input.notes.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Move an appointment from `from` to `to`. Returns `None` when the row
    /// is missing or no longer in `from`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Appointments that still hold a slot on `date` for the same assignee
    /// (both unassigned counts as the same), optionally skipping one id.
    pub async fn find_active_on_date(
        pool: &PgPool,
        date: NaiveDate,
        assigned_to: Option<DbId>,
        exclude_id: Option<DbId>,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let active: Vec<&str> = AppointmentStatus::ACTIVE.iter().map(|s| s.as_str()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM appointments
             WHERE appointment_date = $1
               AND assigned_to IS NOT DISTINCT FROM $2
               AND status = ANY($3)
               AND ($4::BIGINT IS NULL OR id <> $4)
             ORDER BY start_time ASC, id ASC"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(date)
            .bind(assigned_to)
            .bind(active)
            .bind(exclude_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Active appointments on `date` (the "today" sidebar badge).
    pub async fn count_on_date(pool: &PgPool, date: NaiveDate) -> Result<i64, sqlx::Error> {
        let active: Vec<&str> = AppointmentStatus::ACTIVE.iter().map(|s| s.as_str()).collect();
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM appointments WHERE appointment_date = $1 AND status = ANY($2)",
        )
        .bind(date)
        .bind(active)
        .fetch_one(pool)
        .await
    }

    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM appointments GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}
