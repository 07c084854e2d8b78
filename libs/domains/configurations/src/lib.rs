//! Configurations Domain
//!
//! Named, owned, versioned snapshots of composed LaaS environments.
//!
//! A configuration always holds at least one version. Updates either
//! append a new version (which becomes current) or revert the current
//! version to an existing history entry (the history is never rewritten).
//! Configurations can be shared publicly or through a unique share token.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_configurations::{handlers, ConfigurationService, PgConfigurationRepository};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgConfigurationRepository::new(db);
//! let service = ConfigurationService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ConfigurationError, ConfigurationResult};
pub use models::{
    ConfigVersion, Configuration, ConfigurationFilter, CreateConfiguration, UpdateConfiguration,
    VersionInput, OPTION_CATALOG,
};
pub use postgres::PgConfigurationRepository;
pub use repository::ConfigurationRepository;
pub use service::ConfigurationService;
