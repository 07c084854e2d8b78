use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

/// Resolved environment size tier
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
    TS,
    Hash,
)]
#[ts(export)]
pub enum EnvironmentSize {
    #[default]
    Small,
    Medium,
    Large,
}

/// Dollars per unit per month for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct ResourceRates {
    #[serde(rename = "vCPU")]
    #[ts(rename = "vCPU")]
    pub vcpu: f64,
    pub memory: f64,
    pub storage: f64,
}

/// Per-tier monthly unit rates, keyed by resolved environment size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct MonthlyCost {
    pub small: ResourceRates,
    pub medium: ResourceRates,
    pub large: ResourceRates,
}

impl MonthlyCost {
    /// Rates for the given environment size.
    pub fn for_size(&self, size: EnvironmentSize) -> &ResourceRates {
        match size {
            EnvironmentSize::Small => &self.small,
            EnvironmentSize::Medium => &self.medium,
            EnvironmentSize::Large => &self.large,
        }
    }
}

/// Informational per-tier system capacity. Not consulted by the cost math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct CapacityFigures {
    #[serde(rename = "vCPU")]
    #[ts(rename = "vCPU")]
    pub vcpu: f64,
    pub memory: f64,
    pub storage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct SystemCapacity {
    pub small: CapacityFigures,
    pub medium: CapacityFigures,
    pub large: CapacityFigures,
}

/// Inclusive band for one metric within one tier.
///
/// Invariant: `lower_limit <= upper_limit`. Bands need not be contiguous or
/// exhaustive across tiers; the sizing rule only consults the small and
/// medium upper limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TierBoundary {
    pub lower_limit: f64,
    pub upper_limit: f64,
}

/// Boundaries for every metric of one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct SizeBoundaries {
    #[serde(rename = "vCPU")]
    #[ts(rename = "vCPU")]
    pub vcpu: TierBoundary,
    pub memory: TierBoundary,
    pub storage: TierBoundary,
}

/// Tier boundary definitions consumed by the sizing rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct SizeDefinitions {
    pub small: SizeBoundaries,
    pub medium: SizeBoundaries,
    pub large: SizeBoundaries,
}

/// Fractional surcharges (0-1).
///
/// `wwt_lab_manager_fee` is stored and editable but not composed into any
/// cost total; only `dla_fee` participates in the surcharge step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Fees {
    pub wwt_lab_manager_fee: f64,
    pub dla_fee: f64,
}

/// The fee fields visible to non-admin callers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PublicFees {
    pub dla_fee: f64,
}

/// Public-cloud comparison unit rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct CloudCosts {
    pub azure: ResourceRates,
    pub aws: ResourceRates,
}

/// The singleton rate plan document.
///
/// Exactly one plan is authoritative at any time: the latest by
/// `updated_at`. The repository materializes the default plan on first
/// access when the store is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RatePlan {
    #[ts(as = "String")]
    pub id: Uuid,
    pub system_capacity: SystemCapacity,
    pub monthly_cost: MonthlyCost,
    pub environment_size_definitions: SizeDefinitions,
    pub fees: Fees,
    pub cloud_costs: CloudCosts,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub updated_by: Option<Uuid>,
}

impl Default for RatePlan {
    /// The default rate card, used when no plan has been stored yet.
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            system_capacity: SystemCapacity {
                small: CapacityFigures {
                    vcpu: 16.0,
                    memory: 96.0,
                    storage: 8096.0,
                },
                medium: CapacityFigures {
                    vcpu: 96.0,
                    memory: 960.0,
                    storage: 8096.0,
                },
                large: CapacityFigures {
                    vcpu: 186.0,
                    memory: 2064.0,
                    storage: 22528.0,
                },
            },
            monthly_cost: MonthlyCost {
                small: ResourceRates {
                    vcpu: 8.50,
                    memory: 2.50,
                    storage: 0.06,
                },
                medium: ResourceRates {
                    vcpu: 7.50,
                    memory: 1.60,
                    storage: 0.05,
                },
                large: ResourceRates {
                    vcpu: 6.75,
                    memory: 1.50,
                    storage: 0.04,
                },
            },
            environment_size_definitions: SizeDefinitions {
                small: SizeBoundaries {
                    vcpu: TierBoundary {
                        lower_limit: 0.0,
                        upper_limit: 100.0,
                    },
                    memory: TierBoundary {
                        lower_limit: 0.0,
                        upper_limit: 500.0,
                    },
                    storage: TierBoundary {
                        lower_limit: 0.0,
                        upper_limit: 2000.0,
                    },
                },
                medium: SizeBoundaries {
                    vcpu: TierBoundary {
                        lower_limit: 101.0,
                        upper_limit: 300.0,
                    },
                    memory: TierBoundary {
                        lower_limit: 501.0,
                        upper_limit: 4000.0,
                    },
                    storage: TierBoundary {
                        lower_limit: 4000.0,
                        upper_limit: 9999.0,
                    },
                },
                large: SizeBoundaries {
                    vcpu: TierBoundary {
                        lower_limit: 301.0,
                        upper_limit: 999999.0,
                    },
                    memory: TierBoundary {
                        lower_limit: 4001.0,
                        upper_limit: 999999.0,
                    },
                    storage: TierBoundary {
                        lower_limit: 10000.0,
                        upper_limit: 999999.0,
                    },
                },
            },
            fees: Fees {
                wwt_lab_manager_fee: 0.25,
                dla_fee: 0.11,
            },
            cloud_costs: CloudCosts {
                azure: ResourceRates {
                    vcpu: 9.50,
                    memory: 9.40,
                    storage: 0.03,
                },
                aws: ResourceRates {
                    vcpu: 8.70,
                    memory: 8.70,
                    storage: 0.10,
                },
            },
            updated_at: Utc::now(),
            updated_by: None,
        }
    }
}

impl RatePlan {
    /// Apply a group-wise partial update.
    ///
    /// A group present in `update` replaces the stored group wholesale;
    /// absent groups are left untouched. Stamps `updated_at`/`updated_by`.
    pub fn apply_update(&mut self, update: RatePlanUpdate, updated_by: Uuid) {
        if let Some(system_capacity) = update.system_capacity {
            self.system_capacity = system_capacity;
        }
        if let Some(monthly_cost) = update.monthly_cost {
            self.monthly_cost = monthly_cost;
        }
        if let Some(environment_size_definitions) = update.environment_size_definitions {
            self.environment_size_definitions = environment_size_definitions;
        }
        if let Some(fees) = update.fees {
            self.fees = fees;
        }
        if let Some(cloud_costs) = update.cloud_costs {
            self.cloud_costs = cloud_costs;
        }
        self.updated_at = Utc::now();
        self.updated_by = Some(updated_by);
    }
}

/// DTO for a group-wise partial rate plan update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatePlanUpdate {
    pub system_capacity: Option<SystemCapacity>,
    pub monthly_cost: Option<MonthlyCost>,
    pub environment_size_definitions: Option<SizeDefinitions>,
    pub fees: Option<Fees>,
    pub cloud_costs: Option<CloudCosts>,
}

/// The rate plan as served to non-admin callers.
///
/// `fees.wwt_lab_manager_fee` and `updated_by` are withheld; the monthly
/// and cloud rates pass through because the client needs them for
/// calculation previews and comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RatePlanView {
    pub system_capacity: SystemCapacity,
    pub monthly_cost: MonthlyCost,
    pub environment_size_definitions: SizeDefinitions,
    pub fees: PublicFees,
    pub cloud_costs: CloudCosts,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl From<RatePlan> for RatePlanView {
    fn from(plan: RatePlan) -> Self {
        Self {
            system_capacity: plan.system_capacity,
            monthly_cost: plan.monthly_cost,
            environment_size_definitions: plan.environment_size_definitions,
            fees: PublicFees {
                dla_fee: plan.fees.dla_fee,
            },
            cloud_costs: plan.cloud_costs,
            updated_at: plan.updated_at,
        }
    }
}

/// A rate plan read, already redacted for the requesting caller
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RatePlanDocument {
    Full(RatePlan),
    Redacted(RatePlanView),
}

impl RatePlanDocument {
    /// Redact the plan according to the caller's role.
    pub fn for_caller(plan: RatePlan, is_admin: bool) -> Self {
        if is_admin {
            RatePlanDocument::Full(plan)
        } else {
            RatePlanDocument::Redacted(plan.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_rate_card() {
        let plan = RatePlan::default();
        assert_eq!(plan.monthly_cost.small.vcpu, 8.50);
        assert_eq!(plan.monthly_cost.large.storage, 0.04);
        assert_eq!(plan.fees.dla_fee, 0.11);
        assert_eq!(plan.environment_size_definitions.small.storage.upper_limit, 2000.0);
        assert!(plan.updated_by.is_none());
    }

    #[test]
    fn test_boundary_invariant_in_defaults() {
        let defs = RatePlan::default().environment_size_definitions;
        for bounds in [defs.small, defs.medium, defs.large] {
            for band in [bounds.vcpu, bounds.memory, bounds.storage] {
                assert!(band.lower_limit <= band.upper_limit);
            }
        }
    }

    #[test]
    fn test_apply_update_replaces_present_groups_only() {
        let mut plan = RatePlan::default();
        let original_costs = plan.monthly_cost;
        let admin = Uuid::now_v7();

        plan.apply_update(
            RatePlanUpdate {
                fees: Some(Fees {
                    wwt_lab_manager_fee: 0.30,
                    dla_fee: 0.15,
                }),
                ..Default::default()
            },
            admin,
        );

        assert_eq!(plan.fees.dla_fee, 0.15);
        assert_eq!(plan.fees.wwt_lab_manager_fee, 0.30);
        // Absent groups untouched
        assert_eq!(plan.monthly_cost, original_costs);
        assert_eq!(plan.updated_by, Some(admin));
    }

    #[test]
    fn test_view_redacts_manager_fee_and_updater() {
        let plan = RatePlan::default();
        let view = RatePlanView::from(plan.clone());

        assert_eq!(view.fees.dla_fee, plan.fees.dla_fee);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("fees").unwrap().get("wwtLabManagerFee").is_none());
        assert!(json.get("updatedBy").is_none());
        // Rates needed by the client still pass through
        assert!(json.get("monthlyCost").is_some());
        assert!(json.get("cloudCosts").is_some());
    }

    #[test]
    fn test_document_for_caller() {
        let plan = RatePlan::default();
        assert!(matches!(
            RatePlanDocument::for_caller(plan.clone(), true),
            RatePlanDocument::Full(_)
        ));
        assert!(matches!(
            RatePlanDocument::for_caller(plan, false),
            RatePlanDocument::Redacted(_)
        ));
    }

    #[test]
    fn test_plan_serializes_camel_case() {
        let json = serde_json::to_value(RatePlan::default()).unwrap();
        assert!(json.get("systemCapacity").is_some());
        assert!(json.get("environmentSizeDefinitions").is_some());
        assert_eq!(
            json["monthlyCost"]["small"]["vCPU"],
            serde_json::json!(8.50)
        );
        assert_eq!(json["fees"]["wwtLabManagerFee"], serde_json::json!(0.25));
    }
}
