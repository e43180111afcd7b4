use aristokrat_auth::{create_access_token, create_token_pair, verify_refresh_token};
use aristokrat_config::JwtConfig;
use aristokrat_core::{AppError, verify_password};
use sqlx::PgPool;
use tracing::instrument;

use super::model::{LoginRequest, LoginResponse, RefreshResponse};
use crate::metrics::{track_login_failure, track_login_success};
use crate::modules::users::model::UserResponse;
use crate::modules::users::service::UserService;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct AuthService;

impl AuthService {
    /// Verifies credentials and issues a token pair.
    ///
    /// Unknown users, wrong passwords and inactive accounts all fail with the
    /// same `401` so the response never tells which one it was.
    #[instrument(skip(db, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(user) = UserService::find_by_login(db, &dto.login).await? else {
            track_login_failure("unknown_user");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            track_login_failure("wrong_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if !user.is_active {
            track_login_failure("inactive");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let tokens = create_token_pair(user.id, &user.username, user.is_admin, jwt_config)?;
        let profile = UserService::find_profile(db, user.id).await?;

        track_login_success(user.is_admin);
        tracing::info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(LoginResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user: UserResponse::new(&user, profile.as_ref()),
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The access token is built from the current user row, so a user who was
    /// deactivated or demoted since login gets no new token with stale rights.
    #[instrument(skip_all)]
    pub async fn refresh(
        db: &PgPool,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<RefreshResponse, AppError> {
        let claims = verify_refresh_token(refresh_token, jwt_config)?;
        let user_id = claims.user_id()?;

        let user = UserService::find_by_id(db, user_id)
            .await
            .map_err(|_| AppError::unauthorized("Invalid refresh token"))?;

        if !user.is_active {
            return Err(AppError::unauthorized("Invalid refresh token"));
        }

        let access_token = create_access_token(user.id, &user.username, user.is_admin, jwt_config)?;
        Ok(RefreshResponse { access_token })
    }
}
