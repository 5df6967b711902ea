//! Booking request lifecycle and form validation.
//!
//! A booking is the request a visitor submits from the public site. Admins
//! move it `pending -> confirmed -> completed`, or cancel it from either
//! of the first two states. Confirming a booking is what creates the linked
//! appointment (see the bookings handler in the API crate).

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::status::Lifecycle;
use crate::validation::{require, validate_email, validate_max_len, validate_phone};

define_text_status! {
    /// Booking lifecycle status.
    BookingStatus("booking") {
        Pending => "pending",
        Confirmed => "confirmed",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl Lifecycle for BookingStatus {
    const ENTITY: &'static str = "booking";

    fn allowed_transitions(self) -> &'static [Self] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed => &[BookingStatus::Completed, BookingStatus::Cancelled],
            BookingStatus::Completed | BookingStatus::Cancelled => &[],
        }
    }
}

/// Maximum length of free-text booking notes.
pub const MAX_NOTES_LEN: usize = 2000;

/// Maximum length of a name field.
pub const MAX_NAME_LEN: usize = 200;

/// Borrowed view of a booking submission for validation.
#[derive(Debug, Clone, Copy)]
pub struct NewBooking<'a> {
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: &'a str,
    pub service_type: &'a str,
    pub preferred_date: NaiveDate,
    pub notes: Option<&'a str>,
}

/// Validate a booking submission.
///
/// `today` is passed in rather than read from the clock so the rule stays
/// testable; a preferred date earlier than `today` is rejected.
pub fn validate_new_booking(input: &NewBooking<'_>, today: NaiveDate) -> Result<(), CoreError> {
    require("full_name", input.full_name)?;
    validate_max_len("full_name", input.full_name, MAX_NAME_LEN)?;
    require("phone", input.phone)?;
    validate_phone("phone", input.phone)?;
    require("service_type", input.service_type)?;

    if let Some(email) = input.email.filter(|e| !e.trim().is_empty()) {
        validate_email("email", email)?;
    }
    if let Some(notes) = input.notes {
        validate_max_len("notes", notes, MAX_NOTES_LEN)?;
    }
    if input.preferred_date < today {
        return Err(CoreError::Validation(
            "preferred_date cannot be in the past".into(),
        ));
    }
    Ok(())
}
