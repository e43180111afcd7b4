//! Token creation and verification.
//!
//! Both token kinds are HS256 JWTs signed with [`JwtConfig::secret`]. The
//! lifetimes come from [`JwtConfig::access_token_expiry`] and
//! [`JwtConfig::refresh_token_expiry`] (seconds).
//!
//! ```ignore
//! use aristokrat_auth::{create_token_pair, verify_token};
//! use aristokrat_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let pair = create_token_pair(user.id, &user.username, user.is_admin, &config)?;
//! let claims = verify_token(&pair.access_token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use aristokrat_config::JwtConfig;
use aristokrat_core::AppError;

use crate::claims::{Claims, RefreshTokenClaims, TokenType};

/// Access and refresh token issued together at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Returns `(iat, exp)` for a token living `lifetime` seconds.
fn timestamps(lifetime: i64) -> (usize, usize) {
    let now = Utc::now().timestamp();
    (now as usize, (now + lifetime).max(0) as usize)
}

/// Creates a short-lived access token for the given user.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    user_id: i64,
    username: &str,
    is_admin: bool,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let (iat, exp) = timestamps(jwt_config.access_token_expiry);
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        token_type: TokenType::Access,
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Verifies an access token and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired, or the token is a refresh token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

    if claims.token_type != TokenType::Access {
        return Err(AppError::unauthorized("Invalid token type"));
    }

    Ok(claims)
}

/// Creates a long-lived refresh token.
pub fn create_refresh_token(user_id: i64, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let (iat, exp) = timestamps(jwt_config.refresh_token_expiry);
    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        token_type: TokenType::Refresh,
        exp,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Verifies a refresh token and returns its claims.
///
/// Access tokens are rejected here even though they share the secret.
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AppError> {
    let claims = decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired refresh token"))?;

    if claims.token_type != TokenType::Refresh {
        return Err(AppError::unauthorized("Invalid token type"));
    }

    Ok(claims)
}

pub fn create_token_pair(
    user_id: i64,
    username: &str,
    is_admin: bool,
    jwt_config: &JwtConfig,
) -> Result<TokenPair, AppError> {
    Ok(TokenPair {
        access_token: create_access_token(user_id, username, is_admin, jwt_config)?,
        refresh_token: create_refresh_token(user_id, jwt_config)?,
    })
}
