use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    change_password, get_approval_status, get_password_status, get_profile_me,
    replace_profile_me, update_profile_me,
};
use crate::state::AppState;

/// Routes nested under `/api/profile`.
pub fn init_profile_router() -> Router<AppState> {
    Router::new().route(
        "/me",
        get(get_profile_me)
            .put(replace_profile_me)
            .patch(update_profile_me),
    )
}

/// Routes nested under `/api/me`.
pub fn init_me_router() -> Router<AppState> {
    Router::new()
        .route("/password-status", get(get_password_status))
        .route("/approval-status", get(get_approval_status))
        .route("/change-password", post(change_password))
}
