//! Configuration for the LaaS API

use axum_helpers::JwtConfig;
use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
    pub jwt: JwtConfig,
    pub environment: Environment,
    /// Browser origins allowed by CORS (`CORS_ALLOWED_ORIGINS`,
    /// comma-separated). Empty means permissive in development and no CORS
    /// layer in production (same-origin serving).
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let postgres = PostgresConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;

        let cors_allowed_origins = env_or_default("CORS_ALLOWED_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            app: app_info!(),
            server,
            postgres,
            jwt,
            environment,
            cors_allowed_origins,
        })
    }
}
