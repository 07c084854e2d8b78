use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::ConfigurationResult,
    models::{Configuration, ConfigurationFilter},
};

/// Repository trait for configuration persistence.
///
/// Version mutations are modeled as whole-document saves: the service
/// loads the configuration, applies the state transition in memory and
/// stores the result. Single-document atomicity is the store's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigurationRepository: Send + Sync {
    /// Persist a newly created configuration
    async fn create(&self, configuration: Configuration) -> ConfigurationResult<Configuration>;

    /// Get a configuration by ID
    async fn get_by_id(&self, id: Uuid) -> ConfigurationResult<Option<Configuration>>;

    /// Get a configuration by its share token
    async fn get_by_share_token(&self, token: &str)
        -> ConfigurationResult<Option<Configuration>>;

    /// List configurations with optional filters
    async fn list(&self, filter: ConfigurationFilter) -> ConfigurationResult<Vec<Configuration>>;

    /// Store the current state of an existing configuration
    async fn save(&self, configuration: Configuration) -> ConfigurationResult<Configuration>;

    /// Hard delete a configuration and all its versions. Returns whether a
    /// row was removed.
    async fn delete(&self, id: Uuid) -> ConfigurationResult<bool>;
}
