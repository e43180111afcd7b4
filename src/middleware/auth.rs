use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use aristokrat_auth::{Claims, verify_token};
use aristokrat_core::AppError;

use crate::state::AppState;

/// Extractor that validates the access token and provides its claims.
///
/// The user must still exist and be active.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0.user_id()
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        // Deactivation takes effect before the access token expires.
        let is_active: Option<bool> =
            sqlx::query_scalar("SELECT is_active FROM users WHERE id = $1")
                .bind(claims.user_id()?)
                .fetch_optional(&state.db)
                .await?;
        if is_active != Some(true) {
            return Err(AppError::unauthorized("User is inactive or does not exist"));
        }

        Ok(AuthUser(claims))
    }
}

/// Like [`AuthUser`] but rejects non-admins with `403`.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_admin() {
            return Err(AppError::forbidden("Admin access required"));
        }

        Ok(AdminUser(auth_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aristokrat_auth::TokenType;

    fn create_test_claims(sub: &str, is_admin: bool) -> Claims {
        Claims {
            sub: sub.to_string(),
            username: "12-1".to_string(),
            is_admin,
            token_type: TokenType::Access,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_user_id() {
        let auth_user = AuthUser(create_test_claims("42", false));
        assert_eq!(auth_user.user_id().unwrap(), 42);
        assert_eq!(auth_user.username(), "12-1");
    }

    #[test]
    fn test_invalid_user_id() {
        let auth_user = AuthUser(create_test_claims("abc", false));
        assert!(auth_user.user_id().is_err());
    }

    #[test]
    fn test_is_admin() {
        assert!(AuthUser(create_test_claims("1", true)).is_admin());
        assert!(!AuthUser(create_test_claims("1", false)).is_admin());
    }
}
