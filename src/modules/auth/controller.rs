use aristokrat_core::AppError;
use aristokrat_core::errors::ErrorResponse;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use tracing::instrument;

use super::model::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserResponse};
use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login with username or email
///
/// The refresh token is also set as an httpOnly `refresh` cookie scoped to
/// `/api/auth/`.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    let cookie = state.cookie_config.set_cookie(
        &response.refresh_token,
        state.jwt_config.refresh_token_expiry,
    );
    Ok(([(header::SET_COOKIE, cookie)], Json(response)))
}

/// Get a new access token
///
/// Reads the refresh token from the `refresh` cookie, or from the
/// `refreshToken` body field when there is no cookie.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body(content = RefreshRequest, description = "Optional when the cookie is sent"),
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 401, description = "Missing, invalid or expired refresh token", body = ErrorResponse),
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<Json<RefreshResponse>, AppError> {
    let from_cookie = jar
        .get(&state.cookie_config.name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());

    let token = match from_cookie {
        Some(token) => token,
        None => serde_json::from_slice::<RefreshRequest>(&body)
            .ok()
            .and_then(|req| req.refresh_token)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::unauthorized("Missing refresh token"))?,
    };

    let response = AuthService::refresh(&state.db, &token, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Logout
///
/// Clears the refresh cookie. Tokens are stateless, so nothing is revoked
/// server-side.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Cookie cleared"),
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout_user(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, state.cookie_config.clear_cookie())],
    )
}

/// Get the current user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    let user = UserService::get_user_response(&state.db, user_id).await?;
    Ok(Json(user))
}
