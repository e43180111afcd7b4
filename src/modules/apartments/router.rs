use axum::{
    Router,
    routing::{get, patch},
};

use super::controller::{
    accept_apartment, block_apartment, create_apartment, delete_apartment, get_apartment,
    list_apartments, reject_apartment, replace_apartment, unblock_apartment, update_apartment,
};
use crate::state::AppState;

/// Reads need any valid token; writes and moderation need an admin token.
pub fn init_apartments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_apartments).post(create_apartment))
        .route(
            "/{id}",
            get(get_apartment)
                .put(replace_apartment)
                .patch(update_apartment)
                .delete(delete_apartment),
        )
        .route("/{id}/accept", patch(accept_apartment))
        .route("/{id}/reject", patch(reject_apartment))
        .route("/{id}/block", patch(block_apartment))
        .route("/{id}/unblock", patch(unblock_apartment))
}
