//! Application state management.
//!
//! The shared state passed to request handlers: configuration, the
//! PostgreSQL connection pool, and the JWT signer/verifier. Cloning is
//! cheap (Arc clones underneath).

use axum_helpers::JwtAuth;
use database::postgres::DatabaseConnection;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: DatabaseConnection,
    /// Stateless JWT authentication
    pub jwt_auth: JwtAuth,
}
