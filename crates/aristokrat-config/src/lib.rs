//! # Aristokrat Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Access/refresh token signing and lifetimes
//! - [`cors`]: Allowed browser origins
//! - [`cookie`]: Refresh-token cookie attributes
//! - [`server`]: Listen addresses and observability switches
//!
//! # Example
//!
//! ```ignore
//! use aristokrat_config::{CookieConfig, CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cookie;
pub mod cors;
pub mod jwt;
pub mod server;

pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads and parses an environment variable, falling back to `default` when
/// it is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Boolean flags accept `true`/`1`/`yes` (any case).
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}
