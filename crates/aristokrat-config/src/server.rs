use std::env;

use crate::{env_flag, env_or};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Port of the separate Prometheus listener
    pub metrics_port: u16,
    pub observability_enabled: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            metrics_port: env_or("METRICS_PORT", 9000),
            observability_enabled: env_flag("OBSERVABILITY_ENABLED", true),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn metrics_address(&self) -> String {
        format!("{}:{}", self.host, self.metrics_port)
    }
}
