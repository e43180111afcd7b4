use aristokrat_core::AppError;
use aristokrat_core::errors::ErrorResponse;
use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use super::model::{EntranceFilterParams, EntranceWithHouse, House};
use super::service::HouseService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// List houses ordered by number
#[utoipa::path(
    get,
    path = "/api/houses",
    responses(
        (status = 200, description = "All houses", body = Vec<House>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    tag = "Houses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_houses(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<House>>, AppError> {
    Ok(Json(HouseService::list_houses(&state.db).await?))
}

/// List entrances, optionally of one house
#[utoipa::path(
    get,
    path = "/api/entrances",
    params(EntranceFilterParams),
    responses(
        (status = 200, description = "Entrances with their house", body = Vec<EntranceWithHouse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    tag = "Houses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_entrances(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<EntranceFilterParams>,
) -> Result<Json<Vec<EntranceWithHouse>>, AppError> {
    let entrances = HouseService::list_entrances(&state.db, filters.house).await?;
    Ok(Json(entrances))
}
