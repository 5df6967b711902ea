//! Appointment lifecycle and time-slot overlap rules.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::booking::BookingStatus;
use crate::error::CoreError;
use crate::status::Lifecycle;
use crate::types::DbId;

define_text_status! {
    /// Appointment lifecycle status.
    AppointmentStatus("appointment") {
        Scheduled => "scheduled",
        InProgress => "in-progress",
        Completed => "completed",
        Cancelled => "cancelled",
        NoShow => "no-show",
    }
}

impl Lifecycle for AppointmentStatus {
    const ENTITY: &'static str = "appointment";

    fn allowed_transitions(self) -> &'static [Self] {
        use AppointmentStatus::*;
        match self {
            Scheduled => &[InProgress, Completed, Cancelled, NoShow],
            InProgress => &[Completed, Cancelled],
            Completed | Cancelled | NoShow => &[],
        }
    }
}

impl AppointmentStatus {
    /// Statuses that still occupy their time slot.
    pub const ACTIVE: &'static [AppointmentStatus] =
        &[AppointmentStatus::Scheduled, AppointmentStatus::InProgress];

    pub fn is_active(self) -> bool {
        Self::ACTIVE.contains(&self)
    }

    /// The status a linked booking should follow when an appointment moves
    /// to `self`, if any.
    pub fn booking_side_effect(self) -> Option<BookingStatus> {
        match self {
            AppointmentStatus::Completed => Some(BookingStatus::Completed),
            AppointmentStatus::Cancelled => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// Default appointment length when created from a booking.
pub const DEFAULT_DURATION_MINUTES: i32 = 30;

/// Shortest bookable appointment.
pub const MIN_DURATION_MINUTES: i32 = 5;

/// Longest bookable appointment (8 hours).
pub const MAX_DURATION_MINUTES: i32 = 480;

pub fn validate_duration(minutes: i32) -> Result<(), CoreError> {
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(CoreError::Validation(format!(
            "duration_minutes must be between {MIN_DURATION_MINUTES} and {MAX_DURATION_MINUTES}"
        )));
    }
    Ok(())
}

/// A half-open interval `[start, end)` on a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: i32,
}

impl TimeSlot {
    pub fn new(date: NaiveDate, start: NaiveTime, duration_minutes: i32) -> Self {
        Self {
            date,
            start,
            duration_minutes,
        }
    }

    /// End of the slot. Slots never spill into the next day; an end past
    /// midnight is clamped to the last representable instant of `date`.
    pub fn end(&self) -> NaiveTime {
        let (end, wrapped_secs) = self
            .start
            .overflowing_add_signed(Duration::minutes(i64::from(self.duration_minutes.max(0))));
        if wrapped_secs != 0 {
            NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(end)
        } else {
            end
        }
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.date == other.date && self.start < other.end() && other.start < self.end()
    }
}

/// Return the ids of `existing` slots that overlap `candidate`.
pub fn find_conflicts(candidate: &TimeSlot, existing: &[(DbId, TimeSlot)]) -> Vec<DbId> {
    existing
        .iter()
        .filter(|(_, slot)| candidate.overlaps(slot))
        .map(|(id, _)| *id)
        .collect()
}

/// Build the error returned when a slot is already taken.
pub fn conflict_error(conflicting_ids: &[DbId]) -> CoreError {
    let ids = conflicting_ids
        .iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(", ");
    CoreError::Conflict(format!(
        "Time slot overlaps existing appointment(s) {ids}"
    ))
}
