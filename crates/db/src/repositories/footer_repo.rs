//! Repository for the single-row `footer_settings` table.

use careline_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::footer::{FooterSettings, UpdateFooterSettings};

const COLUMNS: &str = "about_en, about_fr, address, phone, email, social_links, quick_links, \
                        copyright_en, copyright_fr, updated_by, updated_at";

pub struct FooterRepo;

impl FooterRepo {
    /// The stored footer, or `None` before it was first saved.
    pub async fn get(pool: &PgPool) -> Result<Option<FooterSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM footer_settings WHERE id = 1");
        sqlx::query_as::<_, FooterSettings>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Create the row on first save, otherwise merge the non-`None` fields.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpdateFooterSettings,
        updated_by: Option<DbId>,
    ) -> Result<FooterSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO footer_settings AS f
                (id, about_en, about_fr, address, phone, email, social_links, quick_links,
                 copyright_en, copyright_fr, updated_by)
             VALUES (1, COALESCE($1, ''), COALESCE($2, ''), $3, $4, $5,
                     COALESCE($6, '[]'::jsonb), COALESCE($7, '[]'::jsonb),
                     COALESCE($8, ''), COALESCE($9, ''), $10)
             ON CONFLICT (id) DO UPDATE SET
                about_en = COALESCE($1, f.about_en),
                about_fr = COALESCE($2, f.about_fr),
                address = COALESCE($3, f.address),
                phone = COALESCE($4, f.phone),
                email = COALESCE($5, f.email),
                social_links = COALESCE($6, f.social_links),
                quick_links = COALESCE($7, f.quick_links),
                copyright_en = COALESCE($8, f.copyright_en),
                copyright_fr = COALESCE($9, f.copyright_fr),
                updated_by = $10
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FooterSettings>(&query)
            .bind(&input.about_en)
            .bind(&input.about_fr)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.social_links.as_ref().map(Json))
            .bind(input.quick_links.as_ref().map(Json))
            .bind(&input.copyright_en)
            .bind(&input.copyright_fr)
            .bind(updated_by)
            .fetch_one(pool)
            .await
    }
}
