//! Site footer settings (single row).

use careline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A social network link shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// A bilingual quick link shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickLink {
    pub label_en: String,
    #[serde(default)]
    pub label_fr: String,
    pub url: String,
}

/// The `footer_settings` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FooterSettings {
    pub about_en: String,
    pub about_fr: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub social_links: Json<Vec<SocialLink>>,
    pub quick_links: Json<Vec<QuickLink>>,
    pub copyright_en: String,
    pub copyright_fr: String,
    pub updated_by: Option<DbId>,
    pub updated_at: Timestamp,
}

impl Default for FooterSettings {
    /// Placeholder returned before an admin has saved the footer once.
    fn default() -> Self {
        Self {
            about_en: String::new(),
            about_fr: String::new(),
            address: None,
            phone: None,
            email: None,
            social_links: Json(Vec::new()),
            quick_links: Json(Vec::new()),
            copyright_en: String::new(),
            copyright_fr: String::new(),
            updated_by: None,
            updated_at: Timestamp::default(),
        }
    }
}

/// Partial footer update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFooterSettings {
    pub about_en: Option<String>,
    pub about_fr: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub social_links: Option<Vec<SocialLink>>,
    pub quick_links: Option<Vec<QuickLink>>,
    pub copyright_en: Option<String>,
    pub copyright_fr: Option<String>,
}
