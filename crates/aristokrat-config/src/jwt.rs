use std::env;

use crate::env_or;

/// Default access token lifetime: 30 minutes.
pub const DEFAULT_ACCESS_EXPIRY: i64 = 30 * 60;
/// Default refresh token lifetime: 14 days.
pub const DEFAULT_REFRESH_EXPIRY: i64 = 14 * 24 * 3600;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: env_or("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_EXPIRY),
            refresh_token_expiry: env_or("JWT_REFRESH_EXPIRY", DEFAULT_REFRESH_EXPIRY),
        }
    }
}
