//! Router-level admin guard.
//!
//! ```rust,ignore
//! use axum::{Router, middleware};
//! use crate::middleware::role::require_admin;
//!
//! let admin_routes = init_admin_devices_router()
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};

use aristokrat_core::AppError;

use crate::middleware::auth::AdminUser;
use crate::state::AppState;

/// Rejects the request unless it carries a valid admin access token.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AdminUser(auth_user) = AdminUser::from_request_parts(&mut parts, &state).await?;
    tracing::debug!(username = %auth_user.username(), "Admin access granted");

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}
