//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a Bearer token
//!   or the session cookie.
//! - [`rbac::RequireBookings`] and friends -- Require access to one dashboard
//!   section.

pub mod auth;
pub mod rbac;
