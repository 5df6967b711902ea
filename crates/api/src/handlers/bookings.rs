//! Handlers for bookings: the public request form, the admin inbox and the
//! confirm-and-schedule flow.
//!
//! Confirming a booking tries to put a matching appointment on the calendar.
//! The status change is kept even when that fails; the admin gets a
//! `warning` instead and can retry through `POST /bookings/{id}/appointment`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use careline_core::appointment::{
    validate_duration, AppointmentStatus, TimeSlot, DEFAULT_DURATION_MINUTES,
};
use careline_core::booking::{validate_new_booking, BookingStatus, NewBooking};
use careline_core::error::CoreError;
use careline_core::pagination::PageInfo;
use careline_core::status::Lifecycle;
use careline_core::types::DbId;
use careline_core::validation::{require, validate_email, validate_phone};
use careline_db::models::appointment::{Appointment, CreateAppointment};
use careline_db::models::booking::{Booking, BookingFilter, CreateBooking, UpdateBooking};
use careline_db::repositories::{AppointmentRepo, BookingRepo};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::appointments::{ensure_slot_free, stale_status};
use super::{filter_param, non_blank};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireBookings;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Booking form as submitted by the public site or typed in by an admin.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookingForm {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<NaiveTime>,
    pub service_type: String,
    pub notes: Option<String>,
}

impl BookingForm {
    /// Validate against `today` and normalize into an insert DTO.
    pub fn into_create(self, today: NaiveDate) -> Result<CreateBooking, CoreError> {
        let preferred_date = self
            .preferred_date
            .ok_or_else(|| CoreError::Validation("preferred_date is required".into()))?;
        let email = non_blank(self.email);
        let notes = non_blank(self.notes);

        validate_new_booking(
            &NewBooking {
                full_name: &self.full_name,
                email: email.as_deref(),
                phone: &self.phone,
                service_type: &self.service_type,
                preferred_date,
                notes: notes.as_deref(),
            },
            today,
        )?;
        let preferred_time = self
            .preferred_time
            .ok_or_else(|| CoreError::Validation("preferred_time is required".into()))?;

        Ok(CreateBooking {
            full_name: self.full_name.trim().to_string(),
            email,
            phone: self.phone.trim().to_string(),
            preferred_date,
            preferred_time,
            service_type: self.service_type.trim().to_string(),
            notes,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BookingListParams {
    pub status: Option<String>,
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// A booking with its linked appointment, if any.
#[derive(Debug, Serialize)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    pub appointment: Option<Appointment>,
}

#[derive(Debug, Deserialize)]
pub struct BookingStatusRequest {
    pub status: String,
    pub admin_notes: Option<String>,
}

/// Result of a status change or scheduling attempt.
#[derive(Debug, Serialize)]
pub struct BookingStatusResult {
    pub booking: Booking,
    pub appointment: Option<Appointment>,
}

/// Optional adjustments when retrying appointment creation, typically to
/// move around a conflicting slot.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleOverrides {
    pub appointment_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub assigned_to: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/public/bookings
///
/// Visitor-facing booking form. New bookings start out `pending`.
pub async fn submit(
    State(state): State<AppState>,
    AppJson(form): AppJson<BookingForm>,
) -> AppResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    let input = form.into_create(Utc::now().date_naive())?;
    let booking = BookingRepo::create(&state.pool, &input).await?;
    tracing::info!(booking_id = booking.id, service = %booking.service_type, "Booking submitted");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

/// POST /api/admin/bookings
///
/// Manual entry of a booking taken by phone or in person.
pub async fn create(
    State(state): State<AppState>,
    RequireBookings(user): RequireBookings,
    AppJson(form): AppJson<BookingForm>,
) -> AppResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    let input = form.into_create(Utc::now().date_naive())?;
    let booking = BookingRepo::create(&state.pool, &input).await?;
    tracing::info!(booking_id = booking.id, user_id = user.user_id, "Booking entered by staff");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

/// GET /api/admin/bookings
pub async fn list(
    State(state): State<AppState>,
    RequireBookings(_user): RequireBookings,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<BookingListParams>,
) -> AppResult<Json<ApiResponse<Vec<Booking>>>> {
    let filter = BookingFilter {
        status: filter_param(params.status.as_deref())
            .map(str::parse::<BookingStatus>)
            .transpose()?,
        search: params.search,
        date_from: params.date_from,
        date_to: params.date_to,
    };
    let page = page.to_request();

    let items = BookingRepo::list(&state.pool, &filter, page).await?;
    let total = BookingRepo::count(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::paginated(items, PageInfo::new(page, total))))
}

/// GET /api/admin/bookings/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireBookings(_user): RequireBookings,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<BookingDetail>>> {
    let booking = find_or_404(&state.pool, id).await?;
    let appointment = linked_appointment(&state.pool, &booking).await?;
    Ok(Json(ApiResponse::ok(BookingDetail {
        booking,
        appointment,
    })))
}

/// PUT /api/admin/bookings/{id}
///
/// Edit contact details and notes. Status has its own endpoint.
pub async fn update(
    State(state): State<AppState>,
    RequireBookings(user): RequireBookings,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateBooking>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    validate_update(&input)?;
    let booking = BookingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Booking", id))?;
    tracing::info!(booking_id = id, user_id = user.user_id, "Booking updated");
    Ok(Json(ApiResponse::ok(booking)))
}

/// DELETE /api/admin/bookings/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireBookings(user): RequireBookings,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if BookingRepo::delete(&state.pool, id).await? {
        tracing::info!(booking_id = id, user_id = user.user_id, "Booking deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Booking", id))
    }
}

/// PUT /api/admin/bookings/{id}/status
///
/// Move a booking through its lifecycle:
///
/// - `confirmed` creates the linked appointment when there is none yet. If
///   that fails the booking stays confirmed and `warning` explains why.
/// - `cancelled` also cancels a linked appointment that is still `scheduled`.
pub async fn update_status(
    State(state): State<AppState>,
    RequireBookings(user): RequireBookings,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<BookingStatusRequest>,
) -> AppResult<Json<ApiResponse<BookingStatusResult>>> {
    let to: BookingStatus = input.status.parse()?;
    let current = find_or_404(&state.pool, id).await?;
    let from = current.status()?;
    from.validate_transition(to)?;

    let admin_notes = non_blank(input.admin_notes);
    let booking = BookingRepo::update_status(
        &state.pool,
        id,
        from,
        to,
        Some(user.user_id),
        admin_notes.as_deref(),
    )
    .await?
    .ok_or_else(|| stale_status("Booking"))?;
    tracing::info!(
        booking_id = id,
        from = %from,
        to = %to,
        user_id = user.user_id,
        "Booking status changed"
    );

    let mut warning = None;
    let appointment = match (to, booking.appointment_id) {
        (BookingStatus::Confirmed, None) => {
            match schedule_from_booking(&state, &booking, &ScheduleOverrides::default(), user.user_id)
                .await
            {
                Ok(appointment) => Some(appointment),
                Err(e) => {
                    tracing::warn!(booking_id = id, error = %e, "Booking confirmed without appointment");
                    warning = Some(confirm_warning(&e));
                    None
                }
            }
        }
        (BookingStatus::Cancelled, Some(appointment_id)) => {
            match cancel_linked_appointment(&state.pool, appointment_id).await {
                Ok(appointment) => appointment,
                Err(e) => {
                    tracing::warn!(booking_id = id, appointment_id, error = %e, "Linked appointment not cancelled");
                    warning = Some(format!(
                        "Booking cancelled, but appointment #{appointment_id} could not be cancelled. Cancel it from the calendar."
                    ));
                    AppointmentRepo::find_by_id(&state.pool, appointment_id).await?
                }
            }
        }
        _ => linked_appointment(&state.pool, &booking).await?,
    };

    // Re-read so `appointment_id` reflects a link made above.
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .unwrap_or(booking);

    Ok(Json(ApiResponse::with_warning(
        BookingStatusResult {
            booking,
            appointment,
        },
        warning,
    )))
}

/// POST /api/admin/bookings/{id}/appointment
///
/// Retry appointment creation for a confirmed booking that has none. Unlike
/// the confirm flow, conflicts fail the request with 409. The body may move
/// the slot or assign a staff member.
pub async fn schedule(
    State(state): State<AppState>,
    RequireBookings(user): RequireBookings,
    AppPath(id): AppPath<DbId>,
    overrides: Option<AppJson<ScheduleOverrides>>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookingStatusResult>>)> {
    let booking = find_or_404(&state.pool, id).await?;
    if booking.status()? != BookingStatus::Confirmed {
        return Err(AppError::conflict(format!(
            "Only confirmed bookings can be scheduled (current status: '{}')",
            booking.status
        )));
    }
    if let Some(appointment_id) = booking.appointment_id {
        return Err(AppError::conflict(format!(
            "Booking already has appointment #{appointment_id}"
        )));
    }
    if let Some(existing) = AppointmentRepo::find_by_booking(&state.pool, id).await? {
        return Err(AppError::conflict(format!(
            "Appointment #{} already references this booking",
            existing.id
        )));
    }

    let overrides = overrides.map(|AppJson(o)| o).unwrap_or_default();
    let appointment = schedule_from_booking(&state, &booking, &overrides, user.user_id).await?;
    let booking = find_or_404(&state.pool, id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(BookingStatusResult {
            booking,
            appointment: Some(appointment),
        })),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_or_404(pool: &PgPool, id: DbId) -> AppResult<Booking> {
    BookingRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Booking", id))
}

async fn linked_appointment(pool: &PgPool, booking: &Booking) -> AppResult<Option<Appointment>> {
    match booking.appointment_id {
        Some(appointment_id) => Ok(AppointmentRepo::find_by_id(pool, appointment_id).await?),
        None => Ok(None),
    }
}

fn validate_update(input: &UpdateBooking) -> AppResult<()> {
    if let Some(name) = &input.full_name {
        require("full_name", name)?;
    }
    if let Some(phone) = &input.phone {
        validate_phone("phone", phone)?;
    }
    if let Some(service) = &input.service_type {
        require("service_type", service)?;
    }
    if let Some(email) = input
        .email
        .as_ref()
        .and_then(|e| e.as_deref())
        .filter(|e| !e.trim().is_empty())
    {
        validate_email("email", email)?;
    }
    Ok(())
}

/// Appointment draft carrying the booking's patient and preferred slot.
pub fn appointment_from_booking(booking: &Booking, overrides: &ScheduleOverrides) -> CreateAppointment {
    CreateAppointment {
        patient_name: booking.full_name.clone(),
        patient_email: booking.email.clone(),
        patient_phone: Some(booking.phone.clone()),
        appointment_date: overrides.appointment_date.unwrap_or(booking.preferred_date),
        start_time: overrides.start_time.unwrap_or(booking.preferred_time),
        duration_minutes: Some(overrides.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES)),
        service_type: booking.service_type.clone(),
        assigned_to: overrides.assigned_to,
        notes: booking.notes.clone(),
    }
}

/// Check the slot and create the appointment linked to `booking`.
async fn schedule_from_booking(
    state: &AppState,
    booking: &Booking,
    overrides: &ScheduleOverrides,
    actor: DbId,
) -> AppResult<Appointment> {
    let input = appointment_from_booking(booking, overrides);
    let duration = input.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    validate_duration(duration)?;

    let slot = TimeSlot::new(input.appointment_date, input.start_time, duration);
    ensure_slot_free(&state.pool, &slot, input.assigned_to, None).await?;

    let appointment =
        AppointmentRepo::create_for_booking(&state.pool, booking.id, &input, Some(actor)).await?;
    tracing::info!(
        booking_id = booking.id,
        appointment_id = appointment.id,
        date = %appointment.appointment_date,
        "Appointment created from booking"
    );
    Ok(appointment)
}

/// Cancel the linked appointment if it has not started yet.
async fn cancel_linked_appointment(
    pool: &PgPool,
    appointment_id: DbId,
) -> AppResult<Option<Appointment>> {
    let Some(appointment) = AppointmentRepo::find_by_id(pool, appointment_id).await? else {
        return Ok(None);
    };
    if appointment.status()? != AppointmentStatus::Scheduled {
        return Ok(Some(appointment));
    }
    let cancelled = AppointmentRepo::update_status(
        pool,
        appointment_id,
        AppointmentStatus::Scheduled,
        AppointmentStatus::Cancelled,
    )
    .await?
    .ok_or_else(|| stale_status("Appointment"))?;
    tracing::info!(appointment_id, "Linked appointment cancelled with booking");
    Ok(Some(cancelled))
}

/// Human-readable reason shown when confirmation could not schedule.
fn confirm_warning(err: &AppError) -> String {
    let reason = match err {
        AppError::Core(CoreError::Conflict(msg)) | AppError::Core(CoreError::Validation(msg)) => {
            msg.clone()
        }
        _ => "the appointment could not be saved".to_string(),
    };
    format!("Booking confirmed, but no appointment was created: {reason}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn form() -> BookingForm {
        BookingForm {
            full_name: "Marie Curie".into(),
            email: Some(" marie@example.org ".into()),
            phone: "+33 1 23 45 67 89".into(),
            preferred_date: NaiveDate::from_ymd_opt(2026, 3, 12),
            preferred_time: NaiveTime::from_hms_opt(10, 30, 0),
            service_type: "vaccination".into(),
            notes: Some("   ".into()),
        }
    }

    #[test]
    fn form_normalizes() {
        let input = form().into_create(today()).unwrap();
        assert_eq!(input.email.as_deref(), Some("marie@example.org"));
        assert!(input.notes.is_none());
    }

    #[test]
    fn form_reports_missing_fields() {
        let missing_phone = BookingForm {
            phone: String::new(),
            ..form()
        };
        assert_matches!(
            missing_phone.into_create(today()),
            Err(CoreError::Validation(msg)) if msg.contains("phone")
        );

        let missing_date = BookingForm {
            preferred_date: None,
            ..form()
        };
        assert!(missing_date.into_create(today()).is_err());
    }

    #[test]
    fn form_rejects_past_date() {
        let past = BookingForm {
            preferred_date: NaiveDate::from_ymd_opt(2026, 3, 9),
            ..form()
        };
        assert!(past.into_create(today()).is_err());
    }

    fn booking() -> Booking {
        let now = Utc::now();
        Booking {
            id: 5,
            full_name: "Marie Curie".into(),
            email: None,
            phone: "0123456789".into(),
            preferred_date: today(),
            preferred_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            service_type: "checkup".into(),
            notes: Some("first visit".into()),
            status: "confirmed".into(),
            appointment_id: None,
            admin_notes: None,
            confirmed_at: Some(now),
            confirmed_by: Some(1),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn appointment_draft_copies_booking() {
        let draft = appointment_from_booking(&booking(), &ScheduleOverrides::default());
        assert_eq!(draft.patient_name, "Marie Curie");
        assert_eq!(draft.patient_phone.as_deref(), Some("0123456789"));
        assert_eq!(draft.appointment_date, today());
        assert_eq!(draft.duration_minutes, Some(DEFAULT_DURATION_MINUTES));
        assert_eq!(draft.notes.as_deref(), Some("first visit"));
    }

    #[test]
    fn appointment_draft_applies_overrides() {
        let overrides = ScheduleOverrides {
            start_time: NaiveTime::from_hms_opt(15, 0, 0),
            duration_minutes: Some(45),
            assigned_to: Some(3),
            ..Default::default()
        };
        let draft = appointment_from_booking(&booking(), &overrides);
        assert_eq!(draft.start_time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(draft.duration_minutes, Some(45));
        assert_eq!(draft.assigned_to, Some(3));
    }

    #[test]
    fn warning_hides_internal_errors() {
        let conflict = confirm_warning(&AppError::conflict("Time slot overlaps #4"));
        assert!(conflict.ends_with("Time slot overlaps #4"));

        let db = confirm_warning(&AppError::Database(sqlx::Error::PoolTimedOut));
        assert!(db.ends_with("the appointment could not be saved"));
    }
}
