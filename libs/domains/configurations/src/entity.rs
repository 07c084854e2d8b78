use crate::models::Configuration;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the configurations table.
///
/// The version history and current version are document-shaped and stored
/// as JSONB; the fields used for lookups (owner, share_token, is_public)
/// are real columns.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "configurations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner: Uuid,
    pub is_public: bool,
    #[sea_orm(unique)]
    pub share_token: String,
    pub current_version: Json,
    pub versions: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from domain Configuration to Sea-ORM ActiveModel
impl From<&Configuration> for ActiveModel {
    fn from(config: &Configuration) -> Self {
        // Version snapshots are plain data; serialization cannot fail
        ActiveModel {
            id: Set(config.id),
            name: Set(config.name.clone()),
            description: Set(config.description.clone()),
            owner: Set(config.owner),
            is_public: Set(config.is_public),
            share_token: Set(config.share_token.clone()),
            current_version: Set(serde_json::to_value(&config.current_version)
                .expect("version snapshot serializes")),
            versions: Set(
                serde_json::to_value(&config.versions).expect("version snapshot serializes")
            ),
            created_at: Set(config.created_at.into()),
            updated_at: Set(config.updated_at.into()),
        }
    }
}
