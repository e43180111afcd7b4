//! Refresh-token cookie attributes.
//!
//! The refresh token is stored in an httpOnly cookie scoped to the auth
//! routes so that only `/api/auth/refresh` and `/api/auth/logout` ever see it.

use crate::env_flag;

pub const REFRESH_COOKIE_NAME: &str = "refresh";
pub const REFRESH_COOKIE_PATH: &str = "/api/auth/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    /// Set the `Secure` attribute. Enable behind HTTPS.
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: REFRESH_COOKIE_NAME.to_string(),
            path: REFRESH_COOKIE_PATH.to_string(),
            secure: false,
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            secure: env_flag("REFRESH_COOKIE_SECURE", false),
            ..Self::default()
        }
    }

    /// `Set-Cookie` value that stores `token` for `max_age` seconds.
    pub fn set_cookie(&self, token: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path={}; HttpOnly; SameSite=Lax; Max-Age={}",
            self.name,
            token,
            self.path,
            max_age.max(0)
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that makes the browser drop the cookie.
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path={}; HttpOnly; SameSite=Lax; Max-Age=0",
            self.name, self.path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cookie_attributes() {
        let config = CookieConfig::default();
        let cookie = config.set_cookie("abc", 1_209_600);
        assert_eq!(
            cookie,
            "refresh=abc; Path=/api/auth/; HttpOnly; SameSite=Lax; Max-Age=1209600"
        );
    }

    #[test]
    fn test_secure_flag() {
        let config = CookieConfig {
            secure: true,
            ..CookieConfig::default()
        };
        assert!(config.set_cookie("abc", 60).ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = CookieConfig::default().clear_cookie();
        assert!(cookie.starts_with("refresh=;"));
        assert!(cookie.contains("Path=/api/auth/"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
