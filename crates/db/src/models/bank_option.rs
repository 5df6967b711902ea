//! Donation bank-account model and DTOs.

use careline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bank_options` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BankOption {
    pub id: DbId,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub iban: Option<String>,
    pub swift_code: Option<String>,
    pub currency: String,
    pub logo_url: Option<String>,
    pub instructions_en: Option<String>,
    pub instructions_fr: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBankOption {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub iban: Option<String>,
    pub swift_code: Option<String>,
    /// Defaults to `USD` if omitted.
    pub currency: Option<String>,
    pub logo_url: Option<String>,
    pub instructions_en: Option<String>,
    pub instructions_fr: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBankOption {
    pub bank_name: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub iban: Option<String>,
    pub swift_code: Option<String>,
    pub currency: Option<String>,
    pub logo_url: Option<String>,
    pub instructions_en: Option<String>,
    pub instructions_fr: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}
