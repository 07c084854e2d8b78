use axum_helpers::CallerIdentity;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{ConfigurationError, ConfigurationResult},
    models::{Configuration, ConfigurationFilter, CreateConfiguration, UpdateConfiguration},
    repository::ConfigurationRepository,
};

/// Service layer for configuration business logic.
///
/// Ownership is enforced here: a configuration can be mutated only by its
/// owner or an admin, and read by its owner, an admin, or anyone when it
/// is public or fetched through its share token.
#[derive(Clone)]
pub struct ConfigurationService<R: ConfigurationRepository> {
    repository: Arc<R>,
}

impl<R: ConfigurationRepository> ConfigurationService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    fn require_user(caller: &CallerIdentity) -> ConfigurationResult<Uuid> {
        caller.user_id.ok_or_else(|| {
            ConfigurationError::Unauthorized("Authentication required".to_string())
        })
    }

    fn ensure_can_mutate(
        configuration: &Configuration,
        caller: &CallerIdentity,
        user_id: Uuid,
    ) -> ConfigurationResult<()> {
        if configuration.owner == user_id || caller.is_admin() {
            Ok(())
        } else {
            Err(ConfigurationError::Forbidden)
        }
    }

    /// Create a configuration owned by the caller, with its initial version.
    pub async fn create(
        &self,
        input: CreateConfiguration,
        caller: &CallerIdentity,
    ) -> ConfigurationResult<Configuration> {
        let user_id = Self::require_user(caller)?;

        input
            .validate()
            .map_err(|e| ConfigurationError::Validation(e.to_string()))?;

        let configuration = Configuration::new(input, user_id);
        let created = self.repository.create(configuration).await?;

        tracing::info!(configuration_id = %created.id, owner = %user_id, "Created configuration");
        Ok(created)
    }

    /// Get a configuration the caller is allowed to see.
    pub async fn get(
        &self,
        id: Uuid,
        caller: &CallerIdentity,
    ) -> ConfigurationResult<Configuration> {
        let user_id = Self::require_user(caller)?;

        let configuration = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ConfigurationError::NotFound(id))?;

        if configuration.owner != user_id && !caller.is_admin() && !configuration.is_public {
            return Err(ConfigurationError::Forbidden);
        }

        Ok(configuration)
    }

    /// Share-token lookup: public, no identity required.
    pub async fn get_by_share_token(&self, token: &str) -> ConfigurationResult<Configuration> {
        self.repository
            .get_by_share_token(token)
            .await?
            .ok_or_else(|| ConfigurationError::ShareTokenNotFound(token.to_string()))
    }

    /// List the caller's configurations; admins see everyone's.
    pub async fn list_for(
        &self,
        caller: &CallerIdentity,
    ) -> ConfigurationResult<Vec<Configuration>> {
        let user_id = Self::require_user(caller)?;

        let filter = if caller.is_admin() {
            ConfigurationFilter::default()
        } else {
            ConfigurationFilter {
                owner: Some(user_id),
                ..Default::default()
            }
        };

        self.repository.list(filter).await
    }

    /// List public configurations. No identity required.
    pub async fn list_public(&self) -> ConfigurationResult<Vec<Configuration>> {
        self.repository
            .list(ConfigurationFilter {
                is_public: Some(true),
                ..Default::default()
            })
            .await
    }

    /// Update metadata and/or append a new version.
    pub async fn update(
        &self,
        id: Uuid,
        update: UpdateConfiguration,
        caller: &CallerIdentity,
    ) -> ConfigurationResult<Configuration> {
        let user_id = Self::require_user(caller)?;

        update
            .validate()
            .map_err(|e| ConfigurationError::Validation(e.to_string()))?;

        let mut configuration = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ConfigurationError::NotFound(id))?;

        Self::ensure_can_mutate(&configuration, caller, user_id)?;

        configuration.apply_update(update, user_id);
        let saved = self.repository.save(configuration).await?;

        tracing::info!(configuration_id = %id, "Updated configuration");
        Ok(saved)
    }

    /// Revert the current version to an entry of the history.
    pub async fn revert(
        &self,
        id: Uuid,
        version_index: usize,
        caller: &CallerIdentity,
    ) -> ConfigurationResult<Configuration> {
        let user_id = Self::require_user(caller)?;

        let mut configuration = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ConfigurationError::NotFound(id))?;

        Self::ensure_can_mutate(&configuration, caller, user_id)?;

        configuration.revert_to_version(version_index)?;
        let saved = self.repository.save(configuration).await?;

        tracing::info!(configuration_id = %id, version_index, "Reverted configuration");
        Ok(saved)
    }

    /// Hard delete. Non-recoverable.
    pub async fn delete(&self, id: Uuid, caller: &CallerIdentity) -> ConfigurationResult<()> {
        let user_id = Self::require_user(caller)?;

        let configuration = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ConfigurationError::NotFound(id))?;

        Self::ensure_can_mutate(&configuration, caller, user_id)?;

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(ConfigurationError::NotFound(id));
        }

        tracing::info!(configuration_id = %id, "Deleted configuration");
        Ok(())
    }
}
