use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{entity, error::UserResult, models::User, repository::UserRepository};

pub struct PgUserRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let active_model: entity::ActiveModel = (&user).into();
        let model = self.base.insert(active_model).await?;

        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = self.base.find_by_id(id).await?;

        Ok(model.map(|m| m.into()))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(self.base.db())
            .await?;

        Ok(model.map(|m| m.into()))
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Username.eq(username))
            .one(self.base.db())
            .await?;

        Ok(model.map(|m| m.into()))
    }

    async fn find_by_identifier(&self, identifier: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(
                Condition::any()
                    .add(entity::Column::Username.eq(identifier))
                    .add(entity::Column::Email.eq(identifier)),
            )
            .one(self.base.db())
            .await?;

        Ok(model.map(|m| m.into()))
    }
}
