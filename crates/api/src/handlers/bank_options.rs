//! Admin handlers for donation bank options.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use careline_core::types::DbId;
use careline_core::validation::{require, validate_currency, validate_optional_url};
use careline_db::models::bank_option::{BankOption, CreateBankOption, UpdateBankOption};
use careline_db::repositories::BankOptionRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireBankOptions;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Upper-case a currency code so `usd` is accepted as `USD`.
fn normalize_currency(currency: &mut Option<String>) {
    if let Some(c) = currency {
        *c = c.trim().to_ascii_uppercase();
    }
}

/// GET /api/admin/bank-options
pub async fn list(
    State(state): State<AppState>,
    RequireBankOptions(_user): RequireBankOptions,
) -> AppResult<Json<ApiResponse<Vec<BankOption>>>> {
    let options = BankOptionRepo::list(&state.pool, false).await?;
    Ok(Json(ApiResponse::ok(options)))
}

/// POST /api/admin/bank-options
pub async fn create(
    State(state): State<AppState>,
    RequireBankOptions(user): RequireBankOptions,
    AppJson(mut input): AppJson<CreateBankOption>,
) -> AppResult<(StatusCode, Json<ApiResponse<BankOption>>)> {
    require("bank_name", &input.bank_name)?;
    require("account_name", &input.account_name)?;
    require("account_number", &input.account_number)?;
    normalize_currency(&mut input.currency);
    if let Some(currency) = &input.currency {
        validate_currency("currency", currency)?;
    }
    validate_optional_url("logo_url", input.logo_url.as_deref())?;

    let option = BankOptionRepo::create(&state.pool, &input).await?;
    tracing::info!(bank_option_id = option.id, user_id = user.user_id, "Bank option created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(option))))
}

/// GET /api/admin/bank-options/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireBankOptions(_user): RequireBankOptions,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<BankOption>>> {
    let option = BankOptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Bank option", id))?;
    Ok(Json(ApiResponse::ok(option)))
}

/// PUT /api/admin/bank-options/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireBankOptions(user): RequireBankOptions,
    AppPath(id): AppPath<DbId>,
    AppJson(mut input): AppJson<UpdateBankOption>,
) -> AppResult<Json<ApiResponse<BankOption>>> {
    for (field, value) in [
        ("bank_name", &input.bank_name),
        ("account_name", &input.account_name),
        ("account_number", &input.account_number),
    ] {
        if let Some(v) = value {
            require(field, v)?;
        }
    }
    normalize_currency(&mut input.currency);
    if let Some(currency) = &input.currency {
        validate_currency("currency", currency)?;
    }
    validate_optional_url("logo_url", input.logo_url.as_deref())?;

    let option = BankOptionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Bank option", id))?;
    tracing::info!(bank_option_id = id, user_id = user.user_id, "Bank option updated");
    Ok(Json(ApiResponse::ok(option)))
}

/// DELETE /api/admin/bank-options/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireBankOptions(user): RequireBankOptions,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if BankOptionRepo::delete(&state.pool, id).await? {
        tracing::info!(bank_option_id = id, user_id = user.user_id, "Bank option deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Bank option", id))
    }
}
