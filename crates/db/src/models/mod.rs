//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod appointment;
pub mod bank_option;
pub mod booking;
pub mod contact;
pub mod footer;
pub mod gallery;
pub mod media;
pub mod program;
pub mod role;
pub mod session;
pub mod stats;
pub mod user;
