use aristokrat_config::{CookieConfig, CorsConfig, JwtConfig};
use aristokrat_db::init_db_pool;
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub cookie_config: CookieConfig,
}

impl AppState {
    /// State over an existing pool with configuration read from the environment.
    pub fn from_pool(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            cookie_config: CookieConfig::from_env(),
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool().await?;
    Ok(AppState::from_pool(db))
}
