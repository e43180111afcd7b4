use aristokrat_core::AppError;
use aristokrat_core::errors::ErrorResponse;
use axum::Json;
use axum::extract::State;
use tracing::instrument;

use super::model::{ChangePasswordRequest, ProfileMe, StatusResponse, UpdateProfileDto};
use super::service::UserService;
use crate::metrics::track_password_changed;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Get the current user's profile
///
/// Creates an empty resident profile on first access.
#[utoipa::path(
    get,
    path = "/api/profile/me",
    responses(
        (status = 200, description = "Current profile", body = ProfileMe),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_profile_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ProfileMe>, AppError> {
    let user_id = auth_user.user_id()?;
    let profile = UserService::get_profile_me(&state.db, user_id).await?;
    Ok(Json(profile))
}

/// Replace the current user's profile
#[utoipa::path(
    put,
    path = "/api/profile/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ProfileMe),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn replace_profile_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<ProfileMe>, AppError> {
    let user_id = auth_user.user_id()?;
    let profile = UserService::update_profile(&state.db, user_id, dto).await?;
    Ok(Json(profile))
}

/// Partially update the current user's profile
#[utoipa::path(
    patch,
    path = "/api/profile/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ProfileMe),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_profile_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<ProfileMe>, AppError> {
    let user_id = auth_user.user_id()?;
    let profile = UserService::update_profile(&state.db, user_id, dto).await?;
    Ok(Json(profile))
}

/// Whether the current user has replaced their initial password
#[utoipa::path(
    get,
    path = "/api/me/password-status",
    responses(
        (status = 200, description = "`updated` or `not_updated`", body = StatusResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_password_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<StatusResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    Ok(Json(UserService::password_status(&state.db, user_id).await?))
}

/// Moderation status of the current user's profile
#[utoipa::path(
    get,
    path = "/api/me/approval-status",
    responses(
        (status = 200, description = "`accepted` or `not_accepted`", body = StatusResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_approval_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<StatusResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    Ok(Json(UserService::approval_status(&state.db, user_id).await?))
}

/// Change the current user's password
#[utoipa::path(
    post,
    path = "/api/me/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = StatusResponse),
        (status = 400, description = "Wrong current password or new password too short", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    let response = UserService::change_password(&state.db, user_id, dto).await?;
    track_password_changed();
    Ok(Json(response))
}
