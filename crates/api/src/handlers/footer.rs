//! Admin handlers for the site footer.

use axum::extract::State;
use axum::Json;
use careline_core::validation::{require, validate_email, validate_phone, validate_url};
use careline_db::models::footer::{FooterSettings, UpdateFooterSettings};
use careline_db::repositories::FooterRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::RequireFooter;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/admin/footer
///
/// Returns empty settings until the footer is first saved.
pub async fn get(
    State(state): State<AppState>,
    RequireFooter(_user): RequireFooter,
) -> AppResult<Json<ApiResponse<FooterSettings>>> {
    let footer = FooterRepo::get(&state.pool).await?.unwrap_or_default();
    Ok(Json(ApiResponse::ok(footer)))
}

/// PUT /api/admin/footer
///
/// Merge the given fields into the stored footer. Link lists are replaced
/// wholesale when present.
pub async fn update(
    State(state): State<AppState>,
    RequireFooter(user): RequireFooter,
    AppJson(input): AppJson<UpdateFooterSettings>,
) -> AppResult<Json<ApiResponse<FooterSettings>>> {
    validate_footer(&input)?;
    let footer = FooterRepo::upsert(&state.pool, &input, Some(user.user_id)).await?;
    tracing::info!(user_id = user.user_id, "Footer settings saved");
    Ok(Json(ApiResponse::ok(footer)))
}

fn validate_footer(input: &UpdateFooterSettings) -> AppResult<()> {
    if let Some(email) = input.email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email("email", email)?;
    }
    if let Some(phone) = input.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        validate_phone("phone", phone)?;
    }
    for link in input.social_links.iter().flatten() {
        require("social_links.platform", &link.platform)?;
        validate_url("social_links.url", &link.url)?;
    }
    for link in input.quick_links.iter().flatten() {
        require("quick_links.label_en", &link.label_en)?;
        validate_url("quick_links.url", &link.url)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use careline_db::models::footer::{QuickLink, SocialLink};

    use super::*;

    #[test]
    fn accepts_valid_links() {
        let input = UpdateFooterSettings {
            email: Some("info@careline.org".into()),
            social_links: Some(vec![SocialLink {
                platform: "facebook".into(),
                url: "https://facebook.com/careline".into(),
            }]),
            quick_links: Some(vec![QuickLink {
                label_en: "Donate".into(),
                label_fr: "Faire un don".into(),
                url: "/donate".into(),
            }]),
            ..Default::default()
        };
        assert!(validate_footer(&input).is_ok());
    }

    #[test]
    fn rejects_bad_link_url() {
        let input = UpdateFooterSettings {
            social_links: Some(vec![SocialLink {
                platform: "x".into(),
                url: "javascript:alert(1)".into(),
            }]),
            ..Default::default()
        };
        assert!(validate_footer(&input).is_err());
    }
}
