//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT authentication and explicit caller identity
//! - **[`server`]**: server setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: structured error responses
//! - **[`extractors`]**: custom extractors (UUID path, validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_production_app(router, &config, Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod http;
pub mod server;
pub mod shutdown;

// Re-export auth types
pub use auth::{
    caller_identity_middleware, AuthenticatedCaller, CallerIdentity, JwtAuth, JwtClaims, JwtConfig,
    TOKEN_TTL_SECS,
};

// Re-export server types
pub use server::{create_production_app, create_router};

// Re-export health types
pub use health::{health_router, run_health_checks, HealthCheckFuture, HealthResponse};

// Re-export shutdown types
pub use shutdown::{coordinated_shutdown, shutdown_signal, ShutdownCoordinator};

// Re-export HTTP middleware
pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

// Re-export error types
pub use errors::ErrorResponse;

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};
