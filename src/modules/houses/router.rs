use axum::{Router, routing::get};

use super::controller::{list_entrances, list_houses};
use crate::state::AppState;

pub fn init_houses_router() -> Router<AppState> {
    Router::new()
        .route("/houses", get(list_houses))
        .route("/entrances", get(list_entrances))
}
