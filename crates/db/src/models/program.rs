//! Program and nested project models (bilingual content).

use careline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Program {
    pub id: DbId,
    pub slug: String,
    pub category_id: String,
    pub title_en: String,
    pub title_fr: String,
    pub description_en: String,
    pub description_fr: String,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A program together with its projects, as returned by detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramWithProjects {
    #[serde(flatten)]
    pub program: Program,
    pub projects: Vec<ProgramProject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgram {
    pub slug: String,
    pub category_id: String,
    pub title_en: String,
    pub title_fr: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProgram {
    pub slug: Option<String>,
    pub category_id: Option<String>,
    pub title_en: Option<String>,
    pub title_fr: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

/// A row from the `program_projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramProject {
    pub id: DbId,
    pub program_id: DbId,
    pub title_en: String,
    pub title_fr: String,
    pub description_en: String,
    pub description_fr: String,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgramProject {
    pub title_en: String,
    pub title_fr: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProgramProject {
    pub title_en: Option<String>,
    pub title_fr: Option<String>,
    pub description_en: Option<String>,
    pub description_fr: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
}
