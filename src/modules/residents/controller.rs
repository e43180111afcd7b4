use aristokrat_core::AppError;
use aristokrat_core::errors::ErrorResponse;
use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use super::model::{
    BulkApprovalDto, PaginatedResidentsResponse, ResidentFilterParams, UpdatedCountResponse,
};
use super::service::ResidentService;
use crate::metrics::track_approval_update;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List resident profiles (admin)
#[utoipa::path(
    get,
    path = "/api/admin/residents",
    params(
        ("approval_status" = Option<String>, Query, description = "accepted or not_accepted"),
        ("house_number" = Option<i64>, Query, description = "House number"),
        ("entrance_no" = Option<i64>, Query, description = "Entrance number"),
        ("search" = Option<String>, Query, description = "Username, apartment, car or phone substring"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("page_size" = Option<i64>, Query, description = "Items per page (default 50, max 200)"),
    ),
    responses(
        (status = 200, description = "Page of residents", body = PaginatedResidentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_residents(
    State(state): State<AppState>,
    Query(filters): Query<ResidentFilterParams>,
) -> Result<Json<PaginatedResidentsResponse>, AppError> {
    Ok(Json(ResidentService::list_residents(&state.db, filters).await?))
}

/// Accept or reject several residents at once (admin)
#[utoipa::path(
    post,
    path = "/api/admin/residents/approval",
    request_body = BulkApprovalDto,
    responses(
        (status = 200, description = "Number of profiles updated", body = UpdatedCountResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_residents_approval(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BulkApprovalDto>,
) -> Result<Json<UpdatedCountResponse>, AppError> {
    let updated =
        ResidentService::set_approval_bulk(&state.db, &dto.ids, dto.approval_status).await?;
    track_approval_update(dto.approval_status.as_str(), updated);
    Ok(Json(UpdatedCountResponse { updated }))
}
