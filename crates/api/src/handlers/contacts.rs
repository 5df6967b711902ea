//! Handlers for contact-form messages: public submission and the admin inbox.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use careline_core::contact::{validate_new_contact, ContactStatus, NewContact};
use careline_core::error::CoreError;
use careline_core::pagination::PageInfo;
use careline_core::status::Lifecycle;
use careline_core::types::DbId;
use careline_db::models::contact::{Contact, ContactFilter, CreateContact};
use careline_db::repositories::ContactRepo;
use serde::Deserialize;

use super::appointments::stale_status;
use super::{filter_param, non_blank};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireContacts;
use crate::query::PageParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Contact form body. Missing fields surface as validation errors.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactForm {
    pub fn into_create(self) -> Result<CreateContact, CoreError> {
        let phone = non_blank(self.phone);
        let subject = non_blank(self.subject);
        validate_new_contact(&NewContact {
            full_name: &self.full_name,
            email: &self.email,
            phone: phone.as_deref(),
            subject: subject.as_deref(),
            message: &self.message,
        })?;
        Ok(CreateContact {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone,
            subject,
            message: self.message.trim().to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactListParams {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactStatusRequest {
    pub status: String,
}

/// POST /api/public/contacts
pub async fn submit(
    State(state): State<AppState>,
    AppJson(form): AppJson<ContactForm>,
) -> AppResult<(StatusCode, Json<ApiResponse<Contact>>)> {
    let input = form.into_create()?;
    let contact = ContactRepo::create(&state.pool, &input).await?;
    tracing::info!(contact_id = contact.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(contact))))
}

/// GET /api/admin/contacts
pub async fn list(
    State(state): State<AppState>,
    RequireContacts(_user): RequireContacts,
    AppQuery(page): AppQuery<PageParams>,
    AppQuery(params): AppQuery<ContactListParams>,
) -> AppResult<Json<ApiResponse<Vec<Contact>>>> {
    let filter = ContactFilter {
        status: filter_param(params.status.as_deref())
            .map(str::parse::<ContactStatus>)
            .transpose()?,
        search: params.search,
    };
    let page = page.to_request();

    let items = ContactRepo::list(&state.pool, &filter, page).await?;
    let total = ContactRepo::count(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::paginated(items, PageInfo::new(page, total))))
}

/// GET /api/admin/contacts/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireContacts(_user): RequireContacts,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Contact>>> {
    let contact = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Contact", id))?;
    Ok(Json(ApiResponse::ok(contact)))
}

/// PUT /api/admin/contacts/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireContacts(user): RequireContacts,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ContactStatusRequest>,
) -> AppResult<Json<ApiResponse<Contact>>> {
    let to: ContactStatus = input.status.parse()?;
    let current = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Contact", id))?;
    let from = current.status()?;
    from.validate_transition(to)?;

    let contact = ContactRepo::update_status(&state.pool, id, from, to)
        .await?
        .ok_or_else(|| stale_status("Contact"))?;
    tracing::info!(contact_id = id, from = %from, to = %to, user_id = user.user_id, "Contact status changed");
    Ok(Json(ApiResponse::ok(contact)))
}

/// DELETE /api/admin/contacts/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireContacts(user): RequireContacts,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if ContactRepo::delete(&state.pool, id).await? {
        tracing::info!(contact_id = id, user_id = user.user_id, "Contact deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Contact", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_trims_and_drops_blank_optionals() {
        let form = ContactForm {
            full_name: " Jean ".into(),
            email: "jean@example.fr ".into(),
            phone: Some("".into()),
            subject: Some("  ".into()),
            message: "Bonjour".into(),
        };
        let input = form.into_create().unwrap();
        assert_eq!(input.full_name, "Jean");
        assert_eq!(input.email, "jean@example.fr");
        assert!(input.phone.is_none());
        assert!(input.subject.is_none());
    }

    #[test]
    fn form_requires_message() {
        let form = ContactForm {
            full_name: "Jean".into(),
            email: "jean@example.fr".into(),
            ..Default::default()
        };
        let err = form.into_create().unwrap_err();
        assert!(err.to_string().contains("message"));
    }
}
