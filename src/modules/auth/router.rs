use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_me, login_user, logout_user, refresh_token};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout_user))
        .route("/me", get(get_me))
}
