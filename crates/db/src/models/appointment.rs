//! Appointment model and DTOs.

use careline_core::appointment::{AppointmentStatus, TimeSlot};
use careline_core::error::CoreError;
use careline_core::types::{deserialize_patch, DbId, Patch, Timestamp};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub patient_name: String,
    pub patient_email: Option<String>,
    pub patient_phone: Option<String>,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub service_type: String,
    pub status: String,
    /// Booking this appointment was created from, if any.
    pub booking_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub notes: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Appointment {
    pub fn status(&self) -> Result<AppointmentStatus, CoreError> {
        self.status.parse()
    }

    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.appointment_date, self.start_time, self.duration_minutes)
    }
}

/// DTO for inserting an appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointment {
    pub patient_name: String,
    pub patient_email: Option<String>,
    pub patient_phone: Option<String>,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveTime,
    /// Defaults to 30 minutes if omitted.
    pub duration_minutes: Option<i32>,
    pub service_type: String,
    pub assigned_to: Option<DbId>,
    pub notes: Option<String>,
}

/// DTO for editing an appointment. All fields are optional; the nullable
/// ones are [`Patch`]es, so an explicit `null` clears them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppointment {
    pub patient_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub patient_email: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub patient_phone: Patch<String>,
    pub appointment_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub assigned_to: Patch<DbId>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub notes: Patch<String>,
}

impl UpdateAppointment {
    /// Whether the update moves the appointment in time.
    pub fn reschedules(&self) -> bool {
        self.appointment_date.is_some()
            || self.start_time.is_some()
            || self.duration_minutes.is_some()
    }
}

/// Filters for the admin appointment list.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub assigned_to: Option<DbId>,
    /// Case-insensitive match on patient name, email or phone.
    pub search: Option<String>,
}
