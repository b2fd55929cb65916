//! API Routes
//!
//! HTTP endpoint definitions. Every handler delegates to `AccountService`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};

use crate::domain::AccountSummary;
use crate::error::AppError;
use crate::service::{
    AccountService, CreateAccountRequest, DisableAccountRequest, EmptyResponse,
    ListAccountsRequest, ListAccountsResponse, UpdatePasswordRequest, UpdateProfileRequest,
};

use super::extract::ApiJson;

/// Create the API router
pub fn create_router() -> Router<AccountService> {
    Router::new()
        .route("/new-user", post(create_user))
        .route("/update-common-data-user", patch(update_common_data))
        .route("/update-password-user", patch(update_password))
        .route("/disable-user", delete(disable_user))
        // Page parameters travel in a JSON body, even on GET
        .route("/list-users", get(list_users))
        .route("/user/:username", get(get_user))
}

/// POST /new-user
async fn create_user(
    State(service): State<AccountService>,
    ApiJson(request): ApiJson<CreateAccountRequest>,
) -> Result<(StatusCode, Json<EmptyResponse>), AppError> {
    service.create(request).await?;
    Ok((StatusCode::CREATED, Json(EmptyResponse {})))
}

/// PATCH /update-common-data-user
async fn update_common_data(
    State(service): State<AccountService>,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<EmptyResponse>, AppError> {
    service.update_profile(request).await?;
    Ok(Json(EmptyResponse {}))
}

/// PATCH /update-password-user
async fn update_password(
    State(service): State<AccountService>,
    ApiJson(request): ApiJson<UpdatePasswordRequest>,
) -> Result<Json<EmptyResponse>, AppError> {
    service.update_password(request).await?;
    Ok(Json(EmptyResponse {}))
}

/// DELETE /disable-user
async fn disable_user(
    State(service): State<AccountService>,
    ApiJson(request): ApiJson<DisableAccountRequest>,
) -> Result<StatusCode, AppError> {
    service.disable(request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /list-users
async fn list_users(
    State(service): State<AccountService>,
    ApiJson(request): ApiJson<ListAccountsRequest>,
) -> Result<Json<ListAccountsResponse>, AppError> {
    let response = service.list(request).await?;
    Ok(Json(response))
}

/// GET /user/:username
async fn get_user(
    State(service): State<AccountService>,
    Path(username): Path<String>,
) -> Result<Json<AccountSummary>, AppError> {
    let account = service.get(&username).await?;
    Ok(Json(account))
}
