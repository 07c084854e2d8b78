//! Users Domain
//!
//! Accounts, roles and password authentication. Successful registration
//! and login return a signed JWT; all later requests carry it as a bearer
//! token and are resolved to a caller identity by the HTTP layer.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{AuthResponse, LoginRequest, RegisterRequest, Role, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
