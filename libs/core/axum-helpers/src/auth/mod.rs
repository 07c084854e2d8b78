//! Authentication and authorization module.
//!
//! This module provides:
//! - Stateless JWT token creation and verification (HS256)
//! - Explicit caller identity, resolved once per request by middleware and
//!   threaded into handlers through extractors
//!
//! Identity is never ambient: handlers receive a [`CallerIdentity`] value and
//! pass it down into domain services explicitly.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{caller_identity_middleware, CallerIdentity, JwtAuth, JwtConfig};
//! use core_config::FromEnv;
//!
//! let config = JwtConfig::from_env()?;
//! let auth = JwtAuth::new(&config);
//!
//! let app = Router::new()
//!     .route("/api/whoami", get(whoami))
//!     .layer(axum::middleware::from_fn_with_state(auth, caller_identity_middleware));
//!
//! async fn whoami(caller: CallerIdentity) -> String {
//!     format!("authenticated: {}", caller.is_authenticated())
//! }
//! ```

pub mod config;
pub mod identity;
pub mod jwt;

// Re-export commonly used types
pub use config::JwtConfig;
pub use identity::{caller_identity_middleware, AuthenticatedCaller, CallerIdentity};
pub use jwt::{JwtAuth, JwtClaims, TOKEN_TTL_SECS};
