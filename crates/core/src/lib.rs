//! Domain rules for the Careline back office.
//!
//! This crate has no internal dependencies and no I/O. It holds status
//! machines, validation helpers, pagination math and role gating so the
//! database and HTTP layers share one definition of each rule.

#[macro_use]
pub mod status;

pub mod appointment;
pub mod booking;
pub mod contact;
pub mod error;
pub mod i18n;
pub mod media;
pub mod navigation;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod validation;
