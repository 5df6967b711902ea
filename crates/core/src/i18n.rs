//! Bilingual (English/French) text selection for public pages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Languages the public site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Fr,
}

impl Lang {
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }

    /// Parse an optional `?lang=` value, falling back to English when the
    /// parameter is absent or not a supported language.
    pub fn from_param(param: Option<&str>) -> Self {
        param.and_then(|p| p.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "fr" => Ok(Lang::Fr),
            other => Err(CoreError::Validation(format!(
                "Unsupported language '{other}'. Must be one of: en, fr"
            ))),
        }
    }
}

/// Pick the text for `lang`, falling back to English when the French copy
/// is blank.
pub fn localize<'a>(lang: Lang, en: &'a str, fr: &'a str) -> &'a str {
    match lang {
        Lang::Fr if !fr.trim().is_empty() => fr,
        _ => en,
    }
}

/// [`localize`] for optional columns. Returns `None` only when both are empty.
pub fn localize_opt<'a>(lang: Lang, en: Option<&'a str>, fr: Option<&'a str>) -> Option<&'a str> {
    let picked = localize(lang, en.unwrap_or(""), fr.unwrap_or(""));
    if picked.trim().is_empty() {
        None
    } else {
        Some(picked)
    }
}
