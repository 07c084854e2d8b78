use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    entity,
    error::{ConfigurationError, ConfigurationResult},
    models::{Configuration, ConfigurationFilter},
    repository::ConfigurationRepository,
};

pub struct PgConfigurationRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgConfigurationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// Decode the JSONB version snapshots back into a domain Configuration.
fn configuration_from_model(model: entity::Model) -> ConfigurationResult<Configuration> {
    let current_version = serde_json::from_value(model.current_version).map_err(|e| {
        ConfigurationError::Internal(format!("Stored current version failed to decode: {}", e))
    })?;
    let versions = serde_json::from_value(model.versions).map_err(|e| {
        ConfigurationError::Internal(format!("Stored version history failed to decode: {}", e))
    })?;

    Ok(Configuration {
        id: model.id,
        name: model.name,
        description: model.description,
        owner: model.owner,
        is_public: model.is_public,
        share_token: model.share_token,
        current_version,
        versions,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    })
}

#[async_trait]
impl ConfigurationRepository for PgConfigurationRepository {
    async fn create(&self, configuration: Configuration) -> ConfigurationResult<Configuration> {
        let active_model: entity::ActiveModel = (&configuration).into();
        let model = self.base.insert(active_model).await?;

        configuration_from_model(model)
    }

    async fn get_by_id(&self, id: Uuid) -> ConfigurationResult<Option<Configuration>> {
        let model = self.base.find_by_id(id).await?;

        model.map(configuration_from_model).transpose()
    }

    async fn get_by_share_token(
        &self,
        token: &str,
    ) -> ConfigurationResult<Option<Configuration>> {
        let model = entity::Entity::find()
            .filter(entity::Column::ShareToken.eq(token))
            .one(self.base.db())
            .await?;

        model.map(configuration_from_model).transpose()
    }

    async fn list(&self, filter: ConfigurationFilter) -> ConfigurationResult<Vec<Configuration>> {
        let mut query = entity::Entity::find();

        if let Some(owner) = filter.owner {
            query = query.filter(entity::Column::Owner.eq(owner));
        }

        if let Some(is_public) = filter.is_public {
            query = query.filter(entity::Column::IsPublic.eq(is_public));
        }

        let models = query
            .order_by_desc(entity::Column::UpdatedAt)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64)
            .all(self.base.db())
            .await?;

        models.into_iter().map(configuration_from_model).collect()
    }

    async fn save(&self, configuration: Configuration) -> ConfigurationResult<Configuration> {
        let active_model: entity::ActiveModel = (&configuration).into();
        let model = self.base.update(active_model).await?;

        configuration_from_model(model)
    }

    async fn delete(&self, id: Uuid) -> ConfigurationResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        Ok(rows_affected > 0)
    }
}
