//! Repositories for `programs` and their nested `program_projects`.

use careline_core::types::DbId;
use sqlx::PgPool;

use crate::models::program::{
    CreateProgram, CreateProgramProject, Program, ProgramProject, UpdateProgram,
    UpdateProgramProject,
};

const COLUMNS: &str = "id, slug, category_id, title_en, title_fr, description_en, \
                        description_fr, image_url, thumbnail_url, sort_order, is_published, \
                        created_at, updated_at";

const PROJECT_COLUMNS: &str = "id, program_id, title_en, title_fr, description_en, \
                                description_fr, image_url, sort_order, created_at, updated_at";

/// Program pages shown on the public site.
pub struct ProgramRepo;

impl ProgramRepo {
    pub async fn create(pool: &PgPool, input: &CreateProgram) -> Result<Program, sqlx::Error> {
        let query = format!(
            "INSERT INTO programs
                (slug, category_id, title_en, title_fr, description_en, description_fr,
                 image_url, thumbnail_url, sort_order, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(&input.slug)
            .bind(&input.category_id)
            .bind(&input.title_en)
            .bind(input.title_fr.as_deref().unwrap_or(""))
            .bind(input.description_en.as_deref().unwrap_or(""))
            .bind(input.description_fr.as_deref().unwrap_or(""))
            .bind(&input.image_url)
            .bind(&input.thumbnail_url)
            .bind(input.sort_order.unwrap_or(0))
            .bind(input.is_published.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look a program up by slug. With `published_only`, drafts are invisible.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM programs
             WHERE slug = $1 AND (NOT $2 OR is_published)"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    /// Programs in display order, optionally narrowed to one category.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
        published_only: bool,
    ) -> Result<Vec<Program>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM programs
             WHERE ($1::TEXT IS NULL OR category_id = $1)
               AND (NOT $2 OR is_published)
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(category)
            .bind(published_only)
            .fetch_all(pool)
            .await
    }

    /// Update a program. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgram,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET
                slug = COALESCE($2, slug),
                category_id = COALESCE($3, category_id),
                title_en = COALESCE($4, title_en),
                title_fr = COALESCE($5, title_fr),
                description_en = COALESCE($6, description_en),
                description_fr = COALESCE($7, description_fr),
                image_url = COALESCE($8, image_url),
                thumbnail_url = COALESCE($9, thumbnail_url),
                sort_order = COALESCE($10, sort_order),
                is_published = COALESCE($11, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.category_id)
            .bind(&input.title_en)
            .bind(&input.title_fr)
            .bind(&input.description_en)
            .bind(&input.description_fr)
            .bind(&input.image_url)
            .bind(&input.thumbnail_url)
            .bind(input.sort_order)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a program. Its projects go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Projects nested under a program. Every method is scoped by `program_id`
/// so a project id from another program is treated as missing.
pub struct ProgramProjectRepo;

impl ProgramProjectRepo {
    pub async fn create(
        pool: &PgPool,
        program_id: DbId,
        input: &CreateProgramProject,
    ) -> Result<ProgramProject, sqlx::Error> {
        let query = format!(
            "INSERT INTO program_projects
                (program_id, title_en, title_fr, description_en, description_fr,
                 image_url, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, ProgramProject>(&query)
            .bind(program_id)
            .bind(&input.title_en)
            .bind(input.title_fr.as_deref().unwrap_or(""))
            .bind(input.description_en.as_deref().unwrap_or(""))
            .bind(input.description_fr.as_deref().unwrap_or(""))
            .bind(&input.image_url)
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Projects of one program in `sort_order`.
    pub async fn list_for_program(
        pool: &PgPool,
        program_id: DbId,
    ) -> Result<Vec<ProgramProject>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM program_projects
             WHERE program_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ProgramProject>(&query)
            .bind(program_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        program_id: DbId,
        id: DbId,
        input: &UpdateProgramProject,
    ) -> Result<Option<ProgramProject>, sqlx::Error> {
        let query = format!(
            "UPDATE program_projects SET
                title_en = COALESCE($3, title_en),
                title_fr = COALESCE($4, title_fr),
                description_en = COALESCE($5, description_en),
                description_fr = COALESCE($6, description_fr),
                image_url = COALESCE($7, image_url),
                sort_order = COALESCE($8, sort_order)
             WHERE id = $1 AND program_id = $2
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, ProgramProject>(&query)
            .bind(id)
            .bind(program_id)
            .bind(&input.title_en)
            .bind(&input.title_fr)
            .bind(&input.description_en)
            .bind(&input.description_fr)
            .bind(&input.image_url)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, program_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM program_projects WHERE id = $1 AND program_id = $2")
            .bind(id)
            .bind(program_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
