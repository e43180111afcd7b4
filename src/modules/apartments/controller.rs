use aristokrat_core::AppError;
use aristokrat_core::errors::ErrorResponse;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use super::model::{
    ApartmentDetail, ApartmentFilterParams, ApprovalResult, ApprovalStatus, BlockResult,
    CreateApartmentDto, PaginatedApartmentsResponse, UpdateApartmentDto,
};
use super::service::ApartmentService;
use crate::metrics::track_approval_update;
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List apartments
#[utoipa::path(
    get,
    path = "/api/apartments",
    params(
        ("house" = Option<i64>, Query, description = "House number"),
        ("entrance" = Option<i64>, Query, description = "Entrance number"),
        ("search" = Option<String>, Query, description = "Substring of the apartment number"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("page_size" = Option<i64>, Query, description = "Items per page (default 50, max 200)"),
    ),
    responses(
        (status = 200, description = "Page of apartments", body = PaginatedApartmentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    tag = "Apartments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_apartments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<ApartmentFilterParams>,
) -> Result<Json<PaginatedApartmentsResponse>, AppError> {
    let apartments = ApartmentService::list_apartments(&state.db, filters).await?;
    Ok(Json(apartments))
}

/// Get an apartment with its address and resident phone
#[utoipa::path(
    get,
    path = "/api/apartments/{id}",
    params(("id" = i64, Path, description = "Apartment ID")),
    responses(
        (status = 200, description = "Apartment", body = ApartmentDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Apartment not found", body = ErrorResponse),
    ),
    tag = "Apartments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_apartment(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApartmentDetail>, AppError> {
    Ok(Json(ApartmentService::get_apartment(&state.db, id).await?))
}

/// Create an apartment (admin)
#[utoipa::path(
    post,
    path = "/api/apartments",
    request_body = CreateApartmentDto,
    responses(
        (status = 201, description = "Apartment created", body = ApartmentDetail),
        (status = 400, description = "Malformed body or unknown entrance", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 409, description = "Number already used in the entrance", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
    ),
    tag = "Apartments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_apartment(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(dto): ValidatedJson<CreateApartmentDto>,
) -> Result<(StatusCode, Json<ApartmentDetail>), AppError> {
    let apartment = ApartmentService::create_apartment(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(apartment)))
}

/// Replace an apartment (admin)
#[utoipa::path(
    put,
    path = "/api/apartments/{id}",
    params(("id" = i64, Path, description = "Apartment ID")),
    request_body = CreateApartmentDto,
    responses(
        (status = 200, description = "Apartment updated", body = ApartmentDetail),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Apartment not found", body = ErrorResponse),
        (status = 409, description = "Number already used in the entrance", body = ErrorResponse),
    ),
    tag = "Apartments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn replace_apartment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<CreateApartmentDto>,
) -> Result<Json<ApartmentDetail>, AppError> {
    Ok(Json(ApartmentService::replace_apartment(&state.db, id, dto).await?))
}

/// Partially update an apartment (admin)
#[utoipa::path(
    patch,
    path = "/api/apartments/{id}",
    params(("id" = i64, Path, description = "Apartment ID")),
    request_body = UpdateApartmentDto,
    responses(
        (status = 200, description = "Apartment updated", body = ApartmentDetail),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Apartment not found", body = ErrorResponse),
        (status = 409, description = "Number already used in the entrance", body = ErrorResponse),
    ),
    tag = "Apartments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_apartment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateApartmentDto>,
) -> Result<Json<ApartmentDetail>, AppError> {
    Ok(Json(ApartmentService::update_apartment(&state.db, id, dto).await?))
}

/// Delete an apartment (admin)
#[utoipa::path(
    delete,
    path = "/api/apartments/{id}",
    params(("id" = i64, Path, description = "Apartment ID")),
    responses(
        (status = 204, description = "Apartment deleted"),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Apartment not found", body = ErrorResponse),
    ),
    tag = "Apartments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_apartment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    ApartmentService::delete_apartment(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn moderate(
    state: &AppState,
    id: i64,
    status: ApprovalStatus,
) -> Result<Json<ApprovalResult>, AppError> {
    let result = ApartmentService::set_approval(&state.db, id, status).await?;
    track_approval_update(status.as_str(), result.updated_profiles);
    Ok(Json(result))
}

/// Accept the residents registered at an apartment (admin)
#[utoipa::path(
    patch,
    path = "/api/apartments/{id}/accept",
    params(("id" = i64, Path, description = "Apartment ID")),
    responses(
        (status = 200, description = "Profiles accepted", body = ApprovalResult),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Apartment not found", body = ErrorResponse),
    ),
    tag = "Apartments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn accept_apartment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApprovalResult>, AppError> {
    moderate(&state, id, ApprovalStatus::Accepted).await
}

/// Reject the residents registered at an apartment (admin)
#[utoipa::path(
    patch,
    path = "/api/apartments/{id}/reject",
    params(("id" = i64, Path, description = "Apartment ID")),
    responses(
        (status = 200, description = "Profiles rejected", body = ApprovalResult),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Apartment not found", body = ErrorResponse),
    ),
    tag = "Apartments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn reject_apartment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApprovalResult>, AppError> {
    moderate(&state, id, ApprovalStatus::NotAccepted).await
}

/// Block an apartment (admin)
#[utoipa::path(
    patch,
    path = "/api/apartments/{id}/block",
    params(("id" = i64, Path, description = "Apartment ID")),
    responses(
        (status = 200, description = "Apartment blocked", body = BlockResult),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Apartment not found", body = ErrorResponse),
    ),
    tag = "Apartments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn block_apartment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<BlockResult>, AppError> {
    Ok(Json(ApartmentService::set_blocked(&state.db, id, true).await?))
}

/// Unblock an apartment (admin)
#[utoipa::path(
    patch,
    path = "/api/apartments/{id}/unblock",
    params(("id" = i64, Path, description = "Apartment ID")),
    responses(
        (status = 200, description = "Apartment unblocked", body = BlockResult),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Apartment not found", body = ErrorResponse),
    ),
    tag = "Apartments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn unblock_apartment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<BlockResult>, AppError> {
    Ok(Json(ApartmentService::set_blocked(&state.db, id, false).await?))
}
