pub mod appointments;
pub mod auth;
pub mod bank_options;
pub mod bookings;
pub mod contacts;
pub mod dashboard;
pub mod footer;
pub mod gallery;
pub mod media;
pub mod navigation;
pub mod programs;
pub mod public;
pub mod users;

/// Trim an optional form value, turning blanks into `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Treat `?status=` (empty) the same as an absent filter.
pub(crate) fn filter_param(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
