use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{PricingError, PricingResult},
    models::{RatePlan, RatePlanUpdate},
    repository::RatePlanRepository,
};

pub struct PgRatePlanRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgRatePlanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Latest plan row by update time, if any.
    async fn find_latest(&self) -> PricingResult<Option<entity::Model>> {
        let model = entity::Entity::find()
            .order_by_desc(entity::Column::UpdatedAt)
            .one(self.base.db())
            .await?;

        Ok(model)
    }
}

/// Decode the JSONB document groups back into a domain RatePlan.
fn plan_from_model(model: entity::Model) -> PricingResult<RatePlan> {
    let decode_error =
        |group: &str, e: serde_json::Error| PricingError::Internal(format!(
            "Stored rate plan group '{}' failed to decode: {}",
            group, e
        ));

    Ok(RatePlan {
        id: model.id,
        system_capacity: serde_json::from_value(model.system_capacity)
            .map_err(|e| decode_error("system_capacity", e))?,
        monthly_cost: serde_json::from_value(model.monthly_cost)
            .map_err(|e| decode_error("monthly_cost", e))?,
        environment_size_definitions: serde_json::from_value(model.environment_size_definitions)
            .map_err(|e| decode_error("environment_size_definitions", e))?,
        fees: serde_json::from_value(model.fees).map_err(|e| decode_error("fees", e))?,
        cloud_costs: serde_json::from_value(model.cloud_costs)
            .map_err(|e| decode_error("cloud_costs", e))?,
        updated_at: model.updated_at.into(),
        updated_by: model.updated_by,
    })
}

#[async_trait]
impl RatePlanRepository for PgRatePlanRepository {
    async fn get_or_init(&self) -> PricingResult<RatePlan> {
        if let Some(model) = self.find_latest().await? {
            return plan_from_model(model);
        }

        // Empty store: materialize the default plan so callers always get a value
        let plan = RatePlan::default();
        let active_model: entity::ActiveModel = (&plan).into();
        let inserted = self.base.insert(active_model).await?;

        tracing::info!(plan_id = %inserted.id, "Materialized default rate plan");
        plan_from_model(inserted)
    }

    async fn update(&self, update: RatePlanUpdate, updated_by: Uuid) -> PricingResult<RatePlan> {
        let mut plan = self.get_or_init().await?;
        plan.apply_update(update, updated_by);

        let active_model: entity::ActiveModel = (&plan).into();
        let updated = self.base.update(active_model).await?;

        plan_from_model(updated)
    }
}
