//! Repository for the `bank_options` table.

use careline_core::types::DbId;
use sqlx::PgPool;

use crate::models::bank_option::{BankOption, CreateBankOption, UpdateBankOption};

const COLUMNS: &str = "id, bank_name, account_name, account_number, iban, swift_code, \
                        currency, logo_url, instructions_en, instructions_fr, is_active, \
                        sort_order, created_at, updated_at";

/// Donation bank accounts.
pub struct BankOptionRepo;

impl BankOptionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateBankOption,
    ) -> Result<BankOption, sqlx::Error> {
        let query = format!(
            "INSERT INTO bank_options
                (bank_name, account_name, account_number, iban, swift_code, currency,
                 logo_url, instructions_en, instructions_fr, is_active, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BankOption>(&query)
            .bind(&input.bank_name)
            .bind(&input.account_name)
            .bind(&input.account_number)
            .bind(&input.iban)
            .bind(&input.swift_code)
            .bind(input.currency.as_deref().unwrap_or("USD"))
            .bind(&input.logo_url)
            .bind(&input.instructions_en)
            .bind(&input.instructions_fr)
            .bind(input.is_active.unwrap_or(true))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BankOption>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bank_options WHERE id = $1");
        sqlx::query_as::<_, BankOption>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All options in display order. With `active_only`, hidden ones are skipped.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<BankOption>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bank_options
             WHERE (NOT $1 OR is_active)
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, BankOption>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBankOption,
    ) -> Result<Option<BankOption>, sqlx::Error> {
        let query = format!(
            "UPDATE bank_options SET
                bank_name = COALESCE($2, bank_name),
                account_name = COALESCE($3, account_name),
                account_number = COALESCE($4, account_number),
                iban = COALESCE($5, iban),
                swift_code = COALESCE($6, swift_code),
                currency = COALESCE($7, currency),
                logo_url = COALESCE($8, logo_url),
                instructions_en = COALESCE($9, instructions_en),
                instructions_fr = COALESCE($10, instructions_fr),
                is_active = COALESCE($11, is_active),
                sort_order = COALESCE($12, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BankOption>(&query)
            .bind(id)
            .bind(&input.bank_name)
            .bind(&input.account_name)
            .bind(&input.account_number)
            .bind(&input.iban)
            .bind(&input.swift_code)
            .bind(&input.currency)
            .bind(&input.logo_url)
            .bind(&input.instructions_en)
            .bind(&input.instructions_fr)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bank_options WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
