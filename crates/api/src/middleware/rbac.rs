//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role may not
//! open the matching dashboard section. The rule table lives in
//! [`careline_core::navigation::can_access`], the same one that builds the
//! sidebar.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use careline_core::navigation::{can_access, Section};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Reject `user` unless their role may open `section`.
pub fn require_section(user: &AuthUser, section: Section) -> Result<(), AppError> {
    if can_access(&user.role, section) {
        Ok(())
    } else {
        tracing::debug!(
            user_id = user.user_id,
            role = %user.role,
            section = section.label(),
            "Section access denied"
        );
        Err(AppError::forbidden(format!(
            "Your role does not have access to {}",
            section.label()
        )))
    }
}

/// Define an extractor that requires access to one [`Section`].
macro_rules! section_extractor {
    ($(#[$meta:meta])* $name:ident => $section:expr) => {
        $(#[$meta])*
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let user = AuthUser::from_request_parts(parts, state).await?;
                require_section(&user, $section)?;
                Ok($name(user))
            }
        }
    };
}

section_extractor!(
    /// Dashboard badges and stats.
    RequireDashboard => Section::Dashboard
);
section_extractor!(RequireBookings => Section::Bookings);
section_extractor!(RequireAppointments => Section::Appointments);
section_extractor!(RequireContacts => Section::Contacts);
section_extractor!(RequirePrograms => Section::Programs);
section_extractor!(RequireGallery => Section::Gallery);
section_extractor!(RequireBankOptions => Section::BankOptions);
section_extractor!(RequireFooter => Section::Footer);
section_extractor!(RequireMedia => Section::Media);
section_extractor!(
    /// User management (admins).
    RequireUsers => Section::Users
);
