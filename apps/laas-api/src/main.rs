//! LaaS Cost Calculator API - REST server

use axum_helpers::{caller_identity_middleware, health_router, server::create_production_app, JwtAuth};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // Connect to PostgreSQL with retry, then bring the schema up to date
    let db = database::postgres::connect_from_config_with_retry(config.postgres.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<Migrator>(&db, "laas_api")
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    // Stateless JWT authentication
    let jwt_auth = JwtAuth::new(&config.jwt);

    let state = AppState {
        config,
        db,
        jwt_auth,
    };

    // Build router with API routes (domain routers carry their own state)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints and resolve caller identity once per request
    // - /health: liveness check with app name/version
    // - /ready: readiness check with an actual database ping
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()))
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_auth.clone(),
            caller_identity_middleware,
        ));

    // The React client is served from a different origin in development
    let app = if !state.config.cors_allowed_origins.is_empty() {
        let origins: Vec<&str> = state
            .config
            .cors_allowed_origins
            .iter()
            .map(String::as_str)
            .collect();
        app.layer(axum_helpers::create_cors_layer(&origins))
    } else if state.config.environment.is_development() {
        app.layer(axum_helpers::create_permissive_cors_layer())
    } else {
        app
    };

    info!("Starting LaaS API with production-ready shutdown (30s timeout)");

    // Production-ready server with graceful shutdown and cleanup
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connection");
            match state.db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("LaaS API shutdown complete");
    Ok(())
}
