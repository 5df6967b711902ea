//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod appointment_repo;
pub mod bank_option_repo;
pub mod booking_repo;
pub mod contact_repo;
pub mod footer_repo;
pub mod gallery_repo;
pub mod media_repo;
pub mod program_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepo;
pub use bank_option_repo::BankOptionRepo;
pub use booking_repo::BookingRepo;
pub use contact_repo::ContactRepo;
pub use footer_repo::FooterRepo;
pub use gallery_repo::{GalleryCategoryRepo, GalleryItemRepo};
pub use media_repo::MediaRepo;
pub use program_repo::{ProgramProjectRepo, ProgramRepo};
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

/// Turn free-text search input into an `ILIKE` pattern, escaping the
/// wildcard characters the user typed.
pub(crate) fn like_pattern(search: Option<&str>) -> Option<String> {
    let term = search.map(str::trim).filter(|s| !s.is_empty())?;
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}
