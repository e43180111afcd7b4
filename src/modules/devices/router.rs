use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    get_entrance_device, get_global_device, list_devices, seed_devices, set_devices_state,
    set_entrance_device, set_global_device,
};
use crate::state::AppState;

/// Public toggle routes, merged directly under `/api`.
pub fn init_devices_router() -> Router<AppState> {
    Router::new()
        .route(
            "/entrances/{no}/{kind}",
            get(get_entrance_device).post(set_entrance_device),
        )
        .route("/{kind}", get(get_global_device).post(set_global_device))
}

/// Routes nested under `/api/admin/devices`.
pub fn init_admin_devices_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_devices))
        .route("/state", post(set_devices_state))
        .route("/seed", post(seed_devices))
}
