use aristokrat_core::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Access token claims.
///
/// Carries enough to authorize a request without a database round trip:
/// the user id, the username and whether the user is an administrator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub username: String,
    pub is_admin: bool,
    pub token_type: TokenType,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }
}

/// Refresh token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub token_type: TokenType,
    pub exp: usize,
    pub iat: usize,
    /// Unique token identifier so two refresh tokens issued in the same
    /// second still differ
    pub jti: String,
}

impl RefreshTokenClaims {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }
}
