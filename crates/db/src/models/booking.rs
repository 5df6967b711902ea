//! Booking request model and DTOs.

use careline_core::booking::BookingStatus;
use careline_core::error::CoreError;
use careline_core::types::{deserialize_patch, DbId, Patch, Timestamp};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    pub service_type: String,
    pub notes: Option<String>,
    pub status: String,
    /// Appointment created when the booking was confirmed.
    pub appointment_id: Option<DbId>,
    pub admin_notes: Option<String>,
    pub confirmed_at: Option<Timestamp>,
    pub confirmed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Parse the stored status column.
    pub fn status(&self) -> Result<BookingStatus, CoreError> {
        self.status.parse()
    }
}

/// DTO for inserting a booking (public form or manual admin entry).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    pub service_type: String,
    pub notes: Option<String>,
}

/// DTO for editing booking details. Status changes go through
/// [`BookingRepo::update_status`](crate::repositories::BookingRepo::update_status).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBooking {
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub email: Patch<String>,
    pub phone: Option<String>,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<NaiveTime>,
    pub service_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub notes: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub admin_notes: Patch<String>,
}

/// Filters for the admin booking list.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    /// Case-insensitive match on name, email or phone.
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}
