//! Unauthenticated read endpoints for the marketing site.
//!
//! Everything here is filtered to published or active rows and flattened
//! to a single language chosen by `?lang=` (English when absent).

use axum::extract::State;
use axum::Json;
use careline_core::i18n::{localize, localize_opt, Lang};
use careline_core::pagination::PageInfo;
use careline_core::types::DbId;
use careline_db::models::bank_option::BankOption;
use careline_db::models::footer::{FooterSettings, SocialLink};
use careline_db::models::gallery::{GalleryCategory, GalleryItem, GalleryItemFilter};
use careline_db::models::program::{Program, ProgramProject};
use careline_db::repositories::{
    BankOptionRepo, FooterRepo, GalleryCategoryRepo, GalleryItemRepo, ProgramProjectRepo,
    ProgramRepo,
};
use serde::{Deserialize, Serialize};

use super::filter_param;
use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::query::{LangParams, PageParams};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Localized views
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PublicProgram {
    pub id: DbId,
    pub slug: String,
    pub category_id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub sort_order: i32,
}

impl PublicProgram {
    fn new(p: Program, lang: Lang) -> Self {
        Self {
            title: localize(lang, &p.title_en, &p.title_fr).to_string(),
            description: localize(lang, &p.description_en, &p.description_fr).to_string(),
            id: p.id,
            slug: p.slug,
            category_id: p.category_id,
            image_url: p.image_url,
            thumbnail_url: p.thumbnail_url,
            sort_order: p.sort_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicProject {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl PublicProject {
    fn new(p: ProgramProject, lang: Lang) -> Self {
        Self {
            title: localize(lang, &p.title_en, &p.title_fr).to_string(),
            description: localize(lang, &p.description_en, &p.description_fr).to_string(),
            id: p.id,
            image_url: p.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicProgramDetail {
    #[serde(flatten)]
    pub program: PublicProgram,
    pub projects: Vec<PublicProject>,
}

#[derive(Debug, Serialize)]
pub struct PublicBankOption {
    pub id: DbId,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub iban: Option<String>,
    pub swift_code: Option<String>,
    pub currency: String,
    pub logo_url: Option<String>,
    pub instructions: Option<String>,
}

impl PublicBankOption {
    fn new(b: BankOption, lang: Lang) -> Self {
        Self {
            instructions: localize_opt(lang, b.instructions_en.as_deref(), b.instructions_fr.as_deref())
                .map(str::to_string),
            id: b.id,
            bank_name: b.bank_name,
            account_name: b.account_name,
            account_number: b.account_number,
            iban: b.iban,
            swift_code: b.swift_code,
            currency: b.currency,
            logo_url: b.logo_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicGalleryCategory {
    pub id: DbId,
    pub slug: String,
    pub name: String,
}

impl PublicGalleryCategory {
    fn new(c: GalleryCategory, lang: Lang) -> Self {
        Self {
            name: localize(lang, &c.name_en, &c.name_fr).to_string(),
            id: c.id,
            slug: c.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicGalleryItem {
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub title: String,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub media_type: String,
}

impl PublicGalleryItem {
    fn new(i: GalleryItem, lang: Lang) -> Self {
        Self {
            title: localize(lang, &i.title_en, &i.title_fr).to_string(),
            id: i.id,
            category_id: i.category_id,
            media_url: i.media_url,
            thumbnail_url: i.thumbnail_url,
            media_type: i.media_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct PublicFooter {
    pub about: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub quick_links: Vec<PublicLink>,
    pub copyright: String,
}

impl PublicFooter {
    fn new(f: FooterSettings, lang: Lang) -> Self {
        let quick_links = f
            .quick_links
            .0
            .into_iter()
            .map(|l| PublicLink {
                label: localize(lang, &l.label_en, &l.label_fr).to_string(),
                url: l.url,
            })
            .collect();
        Self {
            about: localize(lang, &f.about_en, &f.about_fr).to_string(),
            copyright: localize(lang, &f.copyright_en, &f.copyright_fr).to_string(),
            address: f.address,
            phone: f.phone,
            email: f.email,
            social_links: f.social_links.0,
            quick_links,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/public/programs
pub async fn list_programs(
    State(state): State<AppState>,
    AppQuery(lang): AppQuery<LangParams>,
    AppQuery(params): AppQuery<CategoryParams>,
) -> AppResult<Json<ApiResponse<Vec<PublicProgram>>>> {
    let lang = lang.lang();
    let programs =
        ProgramRepo::list(&state.pool, filter_param(params.category.as_deref()), true).await?;
    let programs = programs.into_iter().map(|p| PublicProgram::new(p, lang)).collect();
    Ok(Json(ApiResponse::ok(programs)))
}

/// GET /api/public/programs/{slug}
pub async fn get_program(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
    AppQuery(lang): AppQuery<LangParams>,
) -> AppResult<Json<ApiResponse<PublicProgramDetail>>> {
    let lang = lang.lang();
    let program = ProgramRepo::find_by_slug(&state.pool, &slug, true)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Program '{slug}' not found")))?;
    let projects = ProgramProjectRepo::list_for_program(&state.pool, program.id).await?;

    Ok(Json(ApiResponse::ok(PublicProgramDetail {
        program: PublicProgram::new(program, lang),
        projects: projects.into_iter().map(|p| PublicProject::new(p, lang)).collect(),
    })))
}

/// GET /api/public/bank-options
pub async fn list_bank_options(
    State(state): State<AppState>,
    AppQuery(lang): AppQuery<LangParams>,
) -> AppResult<Json<ApiResponse<Vec<PublicBankOption>>>> {
    let lang = lang.lang();
    let options = BankOptionRepo::list(&state.pool, true).await?;
    let options = options.into_iter().map(|b| PublicBankOption::new(b, lang)).collect();
    Ok(Json(ApiResponse::ok(options)))
}

/// GET /api/public/gallery/categories
pub async fn list_gallery_categories(
    State(state): State<AppState>,
    AppQuery(lang): AppQuery<LangParams>,
) -> AppResult<Json<ApiResponse<Vec<PublicGalleryCategory>>>> {
    let lang = lang.lang();
    let categories = GalleryCategoryRepo::list(&state.pool).await?;
    let categories = categories
        .into_iter()
        .map(|c| PublicGalleryCategory::new(c, lang))
        .collect();
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/public/gallery
///
/// Published items, optionally narrowed by category slug.
pub async fn list_gallery(
    State(state): State<AppState>,
    AppQuery(lang): AppQuery<LangParams>,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<CategoryParams>,
) -> AppResult<Json<ApiResponse<Vec<PublicGalleryItem>>>> {
    let lang = lang.lang();
    let filter = GalleryItemFilter {
        category_id: None,
        category_slug: filter_param(params.category.as_deref()).map(str::to_string),
        published_only: true,
    };
    let page = page.to_request();

    let items = GalleryItemRepo::list(&state.pool, &filter, page).await?;
    let total = GalleryItemRepo::count(&state.pool, &filter).await?;
    let items = items.into_iter().map(|i| PublicGalleryItem::new(i, lang)).collect();
    Ok(Json(ApiResponse::paginated(items, PageInfo::new(page, total))))
}

/// GET /api/public/footer
pub async fn get_footer(
    State(state): State<AppState>,
    AppQuery(lang): AppQuery<LangParams>,
) -> AppResult<Json<ApiResponse<PublicFooter>>> {
    let footer = FooterRepo::get(&state.pool).await?.unwrap_or_default();
    Ok(Json(ApiResponse::ok(PublicFooter::new(footer, lang.lang()))))
}
