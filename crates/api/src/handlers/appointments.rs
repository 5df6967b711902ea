//! Handlers for `/api/admin/appointments`.
//!
//! Every write that places an appointment on the calendar runs the slot
//! conflict check first. Status changes to `completed` or `cancelled` carry
//! over to a linked booking that is still `confirmed`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use careline_core::appointment::{
    conflict_error, find_conflicts, validate_duration, AppointmentStatus, TimeSlot,
    DEFAULT_DURATION_MINUTES,
};
use careline_core::booking::BookingStatus;
use careline_core::pagination::PageInfo;
use careline_core::status::Lifecycle;
use careline_core::types::DbId;
use careline_core::validation::{require, validate_email, validate_phone};
use careline_db::models::appointment::{
    Appointment, AppointmentFilter, CreateAppointment, UpdateAppointment,
};
use careline_db::models::booking::Booking;
use careline_db::repositories::{AppointmentRepo, BookingRepo};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::{filter_param, non_blank};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAppointments;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /appointments`. Fields default so that missing values are
/// reported as validation errors rather than deserialization failures.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppointmentForm {
    pub patient_name: String,
    pub patient_email: Option<String>,
    pub patient_phone: Option<String>,
    pub appointment_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub service_type: String,
    pub assigned_to: Option<DbId>,
    pub notes: Option<String>,
}

impl AppointmentForm {
    fn into_create(self) -> AppResult<CreateAppointment> {
        require("patient_name", &self.patient_name)?;
        require("service_type", &self.service_type)?;
        let appointment_date = self
            .appointment_date
            .ok_or_else(|| AppError::validation("appointment_date is required"))?;
        let start_time = self
            .start_time
            .ok_or_else(|| AppError::validation("start_time is required"))?;
        let duration = self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
        validate_duration(duration)?;

        let patient_email = non_blank(self.patient_email);
        if let Some(email) = &patient_email {
            validate_email("patient_email", email)?;
        }
        let patient_phone = non_blank(self.patient_phone);
        if let Some(phone) = &patient_phone {
            validate_phone("patient_phone", phone)?;
        }

        Ok(CreateAppointment {
            patient_name: self.patient_name.trim().to_string(),
            patient_email,
            patient_phone,
            appointment_date,
            start_time,
            duration_minutes: Some(duration),
            service_type: self.service_type.trim().to_string(),
            assigned_to: self.assigned_to,
            notes: non_blank(self.notes),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AppointmentListParams {
    pub status: Option<String>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub assigned_to: Option<DbId>,
    pub search: Option<String>,
}

/// Query of `GET /appointments/conflicts`.
#[derive(Debug, Deserialize)]
pub struct ConflictParams {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: Option<i32>,
    pub assigned_to: Option<DbId>,
    /// The appointment being edited, so it does not clash with itself.
    pub exclude_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct ConflictReport {
    pub has_conflicts: bool,
    pub conflicts: Vec<Appointment>,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentStatusRequest {
    pub status: String,
}

/// Result of a status change: the appointment plus the booking it updated, if any.
#[derive(Debug, Serialize)]
pub struct AppointmentStatusResult {
    pub appointment: Appointment,
    pub booking: Option<Booking>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/admin/appointments
pub async fn create(
    State(state): State<AppState>,
    RequireAppointments(user): RequireAppointments,
    AppJson(form): AppJson<AppointmentForm>,
) -> AppResult<(StatusCode, Json<ApiResponse<Appointment>>)> {
    let input = form.into_create()?;
    let slot = TimeSlot::new(
        input.appointment_date,
        input.start_time,
        input.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
    );
    ensure_slot_free(&state.pool, &slot, input.assigned_to, None).await?;

    let appointment = AppointmentRepo::create(&state.pool, &input, Some(user.user_id)).await?;
    tracing::info!(
        appointment_id = appointment.id,
        date = %appointment.appointment_date,
        user_id = user.user_id,
        "Appointment created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(appointment))))
}

/// GET /api/admin/appointments
pub async fn list(
    State(state): State<AppState>,
    RequireAppointments(_user): RequireAppointments,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<AppointmentListParams>,
) -> AppResult<Json<ApiResponse<Vec<Appointment>>>> {
    let filter = AppointmentFilter {
        status: filter_param(params.status.as_deref())
            .map(str::parse::<AppointmentStatus>)
            .transpose()?,
        date: params.date,
        date_from: params.date_from,
        date_to: params.date_to,
        assigned_to: params.assigned_to,
        search: params.search,
    };
    let page = page.to_request();

    let items = AppointmentRepo::list(&state.pool, &filter, page).await?;
    let total = AppointmentRepo::count(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::paginated(items, PageInfo::new(page, total))))
}

/// GET /api/admin/appointments/conflicts
///
/// Preview which active appointments a proposed slot would collide with.
pub async fn conflicts(
    State(state): State<AppState>,
    RequireAppointments(_user): RequireAppointments,
    AppQuery(params): AppQuery<ConflictParams>,
) -> AppResult<Json<ApiResponse<ConflictReport>>> {
    let duration = params.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    validate_duration(duration)?;
    let slot = TimeSlot::new(params.date, params.start_time, duration);

    let conflicts =
        overlapping(&state.pool, &slot, params.assigned_to, params.exclude_id).await?;
    Ok(Json(ApiResponse::ok(ConflictReport {
        has_conflicts: !conflicts.is_empty(),
        conflicts,
    })))
}

/// GET /api/admin/appointments/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAppointments(_user): RequireAppointments,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let appointment = find_or_404(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok(appointment)))
}

/// PUT /api/admin/appointments/{id}
///
/// Edit details. Moving the slot is only allowed while `scheduled`.
pub async fn update(
    State(state): State<AppState>,
    RequireAppointments(user): RequireAppointments,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAppointment>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let current = find_or_404(&state.pool, id).await?;
    let status = current.status()?;
    validate_update(&input)?;

    if input.reschedules() && status != AppointmentStatus::Scheduled {
        return Err(AppError::conflict(format!(
            "Only scheduled appointments can be rescheduled (current status: '{status}')"
        )));
    }

    if status.is_active() && (input.reschedules() || input.assigned_to.is_some()) {
        let slot = TimeSlot::new(
            input.appointment_date.unwrap_or(current.appointment_date),
            input.start_time.unwrap_or(current.start_time),
            input.duration_minutes.unwrap_or(current.duration_minutes),
        );
        let assignee = input.assigned_to.unwrap_or(current.assigned_to);
        ensure_slot_free(&state.pool, &slot, assignee, Some(id)).await?;
    }

    let appointment = AppointmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Appointment", id))?;
    tracing::info!(appointment_id = id, user_id = user.user_id, "Appointment updated");

    Ok(Json(ApiResponse::ok(appointment)))
}

/// PUT /api/admin/appointments/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireAppointments(user): RequireAppointments,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<AppointmentStatusRequest>,
) -> AppResult<Json<ApiResponse<AppointmentStatusResult>>> {
    let to: AppointmentStatus = input.status.parse()?;
    let current = find_or_404(&state.pool, id).await?;
    let from = current.status()?;
    from.validate_transition(to)?;

    let appointment = AppointmentRepo::update_status(&state.pool, id, from, to)
        .await?
        .ok_or_else(|| stale_status("Appointment"))?;
    tracing::info!(
        appointment_id = id,
        from = %from,
        to = %to,
        user_id = user.user_id,
        "Appointment status changed"
    );

    let booking = match (to.booking_side_effect(), appointment.booking_id) {
        (Some(target), Some(booking_id)) => {
            follow_booking(&state.pool, booking_id, target, user.user_id).await?
        }
        _ => None,
    };

    Ok(Json(ApiResponse::ok(AppointmentStatusResult {
        appointment,
        booking,
    })))
}

/// DELETE /api/admin/appointments/{id}
///
/// The linked booking keeps its status; its `appointment_id` is cleared by
/// the foreign key.
pub async fn delete(
    State(state): State<AppState>,
    RequireAppointments(user): RequireAppointments,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if AppointmentRepo::delete(&state.pool, id).await? {
        tracing::info!(appointment_id = id, user_id = user.user_id, "Appointment deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Appointment", id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_or_404(pool: &PgPool, id: DbId) -> AppResult<Appointment> {
    AppointmentRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Appointment", id))
}

/// Error for a guarded status update that matched no row.
pub(crate) fn stale_status(entity: &str) -> AppError {
    AppError::conflict(format!(
        "{entity} was changed by someone else. Reload and try again"
    ))
}

fn validate_update(input: &UpdateAppointment) -> AppResult<()> {
    if let Some(name) = &input.patient_name {
        require("patient_name", name)?;
    }
    if let Some(service) = &input.service_type {
        require("service_type", service)?;
    }
    if let Some(email) = input
        .patient_email
        .as_ref()
        .and_then(|e| e.as_deref())
        .filter(|e| !e.trim().is_empty())
    {
        validate_email("patient_email", email)?;
    }
    if let Some(phone) = input
        .patient_phone
        .as_ref()
        .and_then(|p| p.as_deref())
        .filter(|p| !p.trim().is_empty())
    {
        validate_phone("patient_phone", phone)?;
    }
    if let Some(duration) = input.duration_minutes {
        validate_duration(duration)?;
    }
    Ok(())
}

/// Active appointments whose slot overlaps `slot` for the same assignee.
async fn overlapping(
    pool: &PgPool,
    slot: &TimeSlot,
    assigned_to: Option<DbId>,
    exclude_id: Option<DbId>,
) -> AppResult<Vec<Appointment>> {
    let mut candidates =
        AppointmentRepo::find_active_on_date(pool, slot.date, assigned_to, exclude_id).await?;
    let existing: Vec<(DbId, TimeSlot)> = candidates.iter().map(|a| (a.id, a.slot())).collect();
    let clashing = find_conflicts(slot, &existing);
    candidates.retain(|a| clashing.contains(&a.id));
    Ok(candidates)
}

/// Fail with 409 if `slot` overlaps an active appointment of the same assignee.
pub(crate) async fn ensure_slot_free(
    pool: &PgPool,
    slot: &TimeSlot,
    assigned_to: Option<DbId>,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    let clashing = overlapping(pool, slot, assigned_to, exclude_id).await?;
    if clashing.is_empty() {
        return Ok(());
    }
    let ids: Vec<DbId> = clashing.iter().map(|a| a.id).collect();
    tracing::debug!(date = %slot.date, start = %slot.start, ?ids, "Slot conflict");
    Err(conflict_error(&ids).into())
}

/// Move a linked booking to `target` when it is still `confirmed`.
///
/// A booking in any other state is left alone and returned unchanged.
async fn follow_booking(
    pool: &PgPool,
    booking_id: DbId,
    target: BookingStatus,
    actor: DbId,
) -> AppResult<Option<Booking>> {
    let Some(booking) = BookingRepo::find_by_id(pool, booking_id).await? else {
        return Ok(None);
    };
    let from = booking.status()?;
    if from != BookingStatus::Confirmed || !from.can_transition_to(target) {
        return Ok(Some(booking));
    }

    match BookingRepo::update_status(pool, booking_id, from, target, Some(actor), None).await? {
        Some(updated) => {
            tracing::info!(booking_id, to = %target, "Booking followed appointment status");
            Ok(Some(updated))
        }
        None => Ok(BookingRepo::find_by_id(pool, booking_id).await?),
    }
}
