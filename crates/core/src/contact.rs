//! Contact-form messages: status flow and submission validation.

use crate::error::CoreError;
use crate::status::Lifecycle;
use crate::validation::{require, validate_email, validate_max_len, validate_phone};

define_text_status! {
    /// Inbox status of a contact message.
    ContactStatus("contact") {
        New => "new",
        Read => "read",
        Replied => "replied",
        Archived => "archived",
    }
}

impl Lifecycle for ContactStatus {
    const ENTITY: &'static str = "contact";

    fn allowed_transitions(self) -> &'static [Self] {
        use ContactStatus::*;
        match self {
            New => &[Read, Replied, Archived],
            // Marking a read message as unread puts it back to `new`.
            Read => &[New, Replied, Archived],
            Replied => &[Archived],
            Archived => &[Read],
        }
    }
}

/// Maximum length of a contact message body.
pub const MAX_MESSAGE_LEN: usize = 5000;

/// Maximum length of the optional subject line.
pub const MAX_SUBJECT_LEN: usize = 200;

#[derive(Debug, Clone, Copy)]
pub struct NewContact<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub message: &'a str,
}

pub fn validate_new_contact(input: &NewContact<'_>) -> Result<(), CoreError> {
    require("full_name", input.full_name)?;
    require("email", input.email)?;
    validate_email("email", input.email)?;
    require("message", input.message)?;
    validate_max_len("message", input.message, MAX_MESSAGE_LEN)?;

    if let Some(subject) = input.subject {
        validate_max_len("subject", subject, MAX_SUBJECT_LEN)?;
    }
    if let Some(phone) = input.phone.filter(|p| !p.trim().is_empty()) {
        validate_phone("phone", phone)?;
    }
    Ok(())
}
