//! Dashboard landing data: sidebar badge counts and per-status totals.
//!
//! Both endpoints only report on sections the caller's role can open, so a
//! nurse never sees contact counts and an editor never sees bookings.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use careline_core::booking::BookingStatus;
use careline_core::contact::ContactStatus;
use careline_core::navigation::{
    can_access, Section, BADGE_NEW_CONTACTS, BADGE_PENDING_BOOKINGS, BADGE_TODAY_APPOINTMENTS,
};
use careline_db::models::booking::BookingFilter;
use careline_db::models::contact::ContactFilter;
use careline_db::models::stats::StatusCount;
use careline_db::repositories::{AppointmentRepo, BookingRepo, ContactRepo};
use chrono::Utc;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireDashboard;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Per-section status breakdown. Absent sections are not visible to the role.
#[derive(Debug, Default, Serialize)]
pub struct DashboardStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<StatusCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointments: Option<Vec<StatusCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<StatusCount>>,
}

/// GET /api/admin/dashboard/badges
///
/// Keyed by badge name; polled by the admin UI every 30 seconds.
/// "Today" is the current UTC date.
pub async fn badges(
    State(state): State<AppState>,
    RequireDashboard(user): RequireDashboard,
) -> AppResult<Json<ApiResponse<BTreeMap<&'static str, i64>>>> {
    let mut counts = BTreeMap::new();

    if can_access(&user.role, Section::Bookings) {
        let filter = BookingFilter {
            status: Some(BookingStatus::Pending),
            ..Default::default()
        };
        counts.insert(BADGE_PENDING_BOOKINGS, BookingRepo::count(&state.pool, &filter).await?);
    }
    if can_access(&user.role, Section::Appointments) {
        let today = Utc::now().date_naive();
        counts.insert(
            BADGE_TODAY_APPOINTMENTS,
            AppointmentRepo::count_on_date(&state.pool, today).await?,
        );
    }
    if can_access(&user.role, Section::Contacts) {
        let filter = ContactFilter {
            status: Some(ContactStatus::New),
            search: None,
        };
        counts.insert(BADGE_NEW_CONTACTS, ContactRepo::count(&state.pool, &filter).await?);
    }

    Ok(Json(ApiResponse::ok(counts)))
}

/// GET /api/admin/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireDashboard(user): RequireDashboard,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let mut stats = DashboardStats::default();

    if can_access(&user.role, Section::Bookings) {
        stats.bookings = Some(BookingRepo::count_by_status(&state.pool).await?);
    }
    if can_access(&user.role, Section::Appointments) {
        stats.appointments = Some(AppointmentRepo::count_by_status(&state.pool).await?);
    }
    if can_access(&user.role, Section::Contacts) {
        stats.contacts = Some(ContactRepo::count_by_status(&state.pool).await?);
    }

    Ok(Json(ApiResponse::ok(stats)))
}
