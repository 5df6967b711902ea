//! Field-level validation helpers for form submissions and admin edits.
//!
//! Every helper returns [`CoreError::Validation`] with a message that names
//! the offending field, so handlers can forward it to the client unchanged.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid regex")
});

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex"));

/// Minimum number of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Maximum number of digits in a phone number.
pub const MAX_PHONE_DIGITS: usize = 20;

/// Maximum length of a slug.
pub const MAX_SLUG_LEN: usize = 80;

/// Require a non-blank value.
pub fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Require an optional value to be present and non-blank.
pub fn require_some(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    require(field, value.unwrap_or(""))
}

/// Reject values longer than `max` characters.
pub fn validate_max_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate an email address shape (`local@domain.tld`).
pub fn validate_email(field: &str, value: &str) -> Result<(), CoreError> {
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(CoreError::Validation(format!(
            "{field} must be a valid email address"
        )));
    }
    Ok(())
}

/// Validate a phone number.
///
/// Accepts digits with an optional leading `+` and the separators space,
/// dash, dot and parentheses. The digit count must fall within
/// [`MIN_PHONE_DIGITS`]..=[`MAX_PHONE_DIGITS`].
pub fn validate_phone(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let allowed = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'));
    let digits = body.chars().filter(char::is_ascii_digit).count();

    if !allowed || !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(CoreError::Validation(format!(
            "{field} must be a valid phone number"
        )));
    }
    Ok(())
}

/// Validate a lowercase, dash-separated slug such as `mobile-clinic`.
pub fn validate_slug(field: &str, value: &str) -> Result<(), CoreError> {
    if value.len() > MAX_SLUG_LEN || !SLUG_RE.is_match(value) {
        return Err(CoreError::Validation(format!(
            "{field} must be a lowercase slug (letters, digits and single dashes)"
        )));
    }
    Ok(())
}

/// Validate a link target: absolute `http(s)://` URL or a site-relative path.
pub fn validate_url(field: &str, value: &str) -> Result<(), CoreError> {
    let v = value.trim();
    let ok = if let Some(rest) = v
        .strip_prefix("https://")
        .or_else(|| v.strip_prefix("http://"))
    {
        !rest.is_empty() && !rest.contains(char::is_whitespace)
    } else {
        v.starts_with('/') && !v.starts_with("//") && !v.contains(char::is_whitespace)
    };

    if !ok {
        return Err(CoreError::Validation(format!(
            "{field} must be an http(s) URL or a path starting with '/'"
        )));
    }
    Ok(())
}

/// Validate an optional URL; `None` and blank strings pass.
pub fn validate_optional_url(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => validate_url(field, v),
        _ => Ok(()),
    }
}

/// Validate a three-letter uppercase ISO 4217 currency code.
pub fn validate_currency(field: &str, value: &str) -> Result<(), CoreError> {
    if value.len() != 3 || !value.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(CoreError::Validation(format!(
            "{field} must be a three-letter currency code such as USD"
        )));
    }
    Ok(())
}
