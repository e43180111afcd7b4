//! Authentication request and response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::UserResponse;

/// Whether a login looks like an email address (`\S+@\S+\.\S+`).
pub fn looks_like_email(login: &str) -> bool {
    if login.is_empty() || login.chars().any(char::is_whitespace) {
        return false;
    }
    login.char_indices().any(|(at, c)| {
        if c != '@' || at == 0 {
            return false;
        }
        let domain = &login[at + 1..];
        domain
            .char_indices()
            .any(|(dot, d)| d == '.' && dot > 0 && dot + 1 < domain.len())
    })
}

/// Login by username or email.
///
/// Blank fields are not rejected up front; they fail like any other wrong
/// credentials.
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username, or an email address looked up case-insensitively
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("login", &self.login)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

/// Body of a refresh request. The `refresh` cookie takes precedence.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}
