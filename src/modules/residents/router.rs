use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{list_residents, set_residents_approval};
use crate::state::AppState;

/// Routes nested under `/api/admin/residents`.
pub fn init_admin_residents_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_residents))
        .route("/approval", post(set_residents_approval))
}
