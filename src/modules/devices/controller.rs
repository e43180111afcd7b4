//! Device toggles.
//!
//! The public routes answer with a bare JSON boolean: the device state on
//! success, `false` with `404` for an unknown kind/entrance pair and `false`
//! with `400` for a malformed toggle body. The kind is checked before the body.

use aristokrat_core::AppError;
use aristokrat_core::errors::ErrorResponse;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use super::model::{
    BulkDeviceStateDto, Device, DeviceFilterParams, DeviceKey, DeviceToggleRequest,
    SeedDevicesResponse, UpdatedCountResponse,
};
use super::service::DeviceService;
use crate::metrics::{track_device_toggle, track_devices_created};
use crate::state::AppState;
use crate::validator::ValidatedJson;

type DeviceResponse = Result<(StatusCode, Json<bool>), AppError>;

fn not_found() -> DeviceResponse {
    Ok((StatusCode::NOT_FOUND, Json(false)))
}

async fn read_state(state: &AppState, key: DeviceKey) -> DeviceResponse {
    let value = DeviceService::get_state(&state.db, key).await?;
    Ok((StatusCode::OK, Json(value)))
}

async fn write_state(state: &AppState, key: DeviceKey, body: &[u8]) -> DeviceResponse {
    let Some(requested) = DeviceToggleRequest::parse(body) else {
        return Ok((StatusCode::BAD_REQUEST, Json(false)));
    };
    let value = DeviceService::set_state(&state.db, key, requested).await?;
    track_device_toggle(key.kind.as_str(), value);
    Ok((StatusCode::OK, Json(value)))
}

/// Read an entrance device
#[utoipa::path(
    get,
    path = "/api/entrances/{no}/{kind}",
    params(
        ("no" = i16, Path, description = "Entrance number (1-8)"),
        ("kind" = String, Path, description = "door, lift_pass or lift_gruz"),
    ),
    responses(
        (status = 200, description = "Current state", body = bool),
        (status = 404, description = "Unknown kind or entrance", body = bool),
    ),
    tag = "Devices"
)]
#[instrument(skip(state))]
pub async fn get_entrance_device(
    State(state): State<AppState>,
    Path((no, kind)): Path<(String, String)>,
) -> DeviceResponse {
    match DeviceKey::entrance(&kind, &no) {
        Some(key) => read_state(&state, key).await,
        None => not_found(),
    }
}

/// Switch an entrance device
#[utoipa::path(
    post,
    path = "/api/entrances/{no}/{kind}",
    params(
        ("no" = i16, Path, description = "Entrance number (1-8)"),
        ("kind" = String, Path, description = "door, lift_pass or lift_gruz"),
    ),
    request_body = DeviceToggleRequest,
    responses(
        (status = 200, description = "Stored state", body = bool),
        (status = 400, description = "Body is not an object with a boolean `state`", body = bool),
        (status = 404, description = "Unknown kind or entrance", body = bool),
    ),
    tag = "Devices"
)]
#[instrument(skip(state, body))]
pub async fn set_entrance_device(
    State(state): State<AppState>,
    Path((no, kind)): Path<(String, String)>,
    body: Bytes,
) -> DeviceResponse {
    match DeviceKey::entrance(&kind, &no) {
        Some(key) => write_state(&state, key, &body).await,
        None => not_found(),
    }
}

/// Read a global device
#[utoipa::path(
    get,
    path = "/api/{kind}",
    params(("kind" = String, Path, description = "kalitka1-4 or parking")),
    responses(
        (status = 200, description = "Current state", body = bool),
        (status = 404, description = "Unknown kind", body = bool),
    ),
    tag = "Devices"
)]
#[instrument(skip(state))]
pub async fn get_global_device(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> DeviceResponse {
    match DeviceKey::global(&kind) {
        Some(key) => read_state(&state, key).await,
        None => not_found(),
    }
}

/// Switch a global device
#[utoipa::path(
    post,
    path = "/api/{kind}",
    params(("kind" = String, Path, description = "kalitka1-4 or parking")),
    request_body = DeviceToggleRequest,
    responses(
        (status = 200, description = "Stored state", body = bool),
        (status = 400, description = "Body is not an object with a boolean `state`", body = bool),
        (status = 404, description = "Unknown kind", body = bool),
    ),
    tag = "Devices"
)]
#[instrument(skip(state, body))]
pub async fn set_global_device(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Bytes,
) -> DeviceResponse {
    match DeviceKey::global(&kind) {
        Some(key) => write_state(&state, key, &body).await,
        None => not_found(),
    }
}

/// List devices (admin)
#[utoipa::path(
    get,
    path = "/api/admin/devices",
    params(
        ("kind" = Option<String>, Query, description = "Device kind"),
        ("entrance_no" = Option<i64>, Query, description = "Entrance number"),
        ("state" = Option<bool>, Query, description = "Current state"),
    ),
    responses(
        (status = 200, description = "Devices", body = Vec<Device>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_devices(
    State(state): State<AppState>,
    Query(filters): Query<DeviceFilterParams>,
) -> Result<Json<Vec<Device>>, AppError> {
    Ok(Json(DeviceService::list_devices(&state.db, filters).await?))
}

/// Turn several devices on or off (admin)
#[utoipa::path(
    post,
    path = "/api/admin/devices/state",
    request_body = BulkDeviceStateDto,
    responses(
        (status = 200, description = "Number of devices updated", body = UpdatedCountResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn set_devices_state(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BulkDeviceStateDto>,
) -> Result<Json<UpdatedCountResponse>, AppError> {
    let updated = DeviceService::set_state_bulk(&state.db, &dto.ids, dto.state).await?;
    Ok(Json(UpdatedCountResponse { updated }))
}

/// Create all default devices (admin)
#[utoipa::path(
    post,
    path = "/api/admin/devices/seed",
    responses(
        (status = 200, description = "Number of devices created", body = SeedDevicesResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn seed_devices(
    State(state): State<AppState>,
) -> Result<Json<SeedDevicesResponse>, AppError> {
    let created = DeviceService::seed_defaults(&state.db).await?;
    track_devices_created(created);
    Ok(Json(SeedDevicesResponse { created }))
}
