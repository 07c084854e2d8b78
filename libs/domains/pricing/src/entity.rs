use crate::models::RatePlan;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the rate_plans table.
///
/// The document groups are stored as JSONB columns so a group-wise update
/// replaces one column wholesale, matching the merge semantics.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rate_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub system_capacity: Json,
    pub monthly_cost: Json,
    pub environment_size_definitions: Json,
    pub fees: Json,
    pub cloud_costs: Json,
    pub updated_at: DateTimeWithTimeZone,
    pub updated_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from domain RatePlan to Sea-ORM ActiveModel
impl From<&RatePlan> for ActiveModel {
    fn from(plan: &RatePlan) -> Self {
        // Serializing these plain data structs to JSON values cannot fail
        ActiveModel {
            id: Set(plan.id),
            system_capacity: Set(serde_json::to_value(plan.system_capacity)
                .expect("rate plan group serializes")),
            monthly_cost: Set(
                serde_json::to_value(plan.monthly_cost).expect("rate plan group serializes")
            ),
            environment_size_definitions: Set(serde_json::to_value(
                plan.environment_size_definitions,
            )
            .expect("rate plan group serializes")),
            fees: Set(serde_json::to_value(plan.fees).expect("rate plan group serializes")),
            cloud_costs: Set(
                serde_json::to_value(plan.cloud_costs).expect("rate plan group serializes")
            ),
            updated_at: Set(plan.updated_at.into()),
            updated_by: Set(plan.updated_by),
        }
    }
}
