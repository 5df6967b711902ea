//! Shared query parameter types for API handlers.
//!
//! Kept as separate extractors instead of one flattened struct because
//! `serde_urlencoded` cannot parse numbers through `#[serde(flatten)]`.

use careline_core::i18n::Lang;
use careline_core::pagination::PageRequest;
use serde::Deserialize;

/// Page-based pagination parameters (`?page=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// `?lang=` for public endpoints. Unknown values fall back to English.
#[derive(Debug, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

impl LangParams {
    pub fn lang(&self) -> Lang {
        Lang::from_param(self.lang.as_deref())
    }
}
