//! Cost calculation engine and environment sizing rule.
//!
//! Pure functions over a list of resource requests and a rate plan. They
//! hold no state and perform no I/O, so they are safe to call from any
//! number of concurrent request handlers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{EnvironmentSize, RatePlan, ResourceRates, SizeDefinitions};

/// One line item of the composed environment: a per-unit resource
/// footprint multiplied by quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema, TS)]
#[ts(export)]
pub struct ResourceRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub quantity: u32,
    #[serde(rename = "vCPU")]
    #[ts(rename = "vCPU")]
    #[validate(range(min = 0.0))]
    pub vcpu: f64,
    #[validate(range(min = 0.0))]
    pub memory: f64,
    #[validate(range(min = 0.0))]
    pub storage: f64,
}

/// Aggregate demand over all resource requests
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResourceTotals {
    #[serde(rename = "totalVCPU")]
    #[ts(rename = "totalVCPU")]
    pub total_vcpu: f64,
    pub total_memory: f64,
    pub total_storage: f64,
}

/// Monthly and annual figures for one cost perspective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct CostPeriod {
    pub monthly: f64,
    pub annual: f64,
}

/// A public-cloud comparison: cost plus savings versus the surcharged rate.
///
/// `savings_percent` is absent when the provider's monthly cost is zero
/// (the percentage is undefined there, never a runtime error).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ComparisonCost {
    pub monthly: f64,
    pub annual: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<i64>,
}

/// The four cost perspectives of one calculation.
///
/// `base` is the raw internal cost and is only present for authenticated
/// callers; `surcharged` applies the DLA fee on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct CostBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<CostPeriod>,
    pub surcharged: CostPeriod,
    pub azure: ComparisonCost,
    pub aws: ComparisonCost,
}

impl CostBreakdown {
    /// Drop the internal cost perspective.
    ///
    /// The field is removed, not zeroed, so unauthenticated responses carry
    /// no trace of the internal rate.
    pub fn without_internal(self) -> Self {
        Self { base: None, ..self }
    }
}

/// Visibility filter for calculation results.
///
/// Unauthenticated callers never see the internal (`base`) perspective.
/// Admin and non-admin authenticated callers are treated alike here; the
/// admin distinction applies only to rate plan reads.
pub fn filter_for_caller(costs: CostBreakdown, caller_is_authenticated: bool) -> CostBreakdown {
    if caller_is_authenticated {
        costs
    } else {
        costs.without_internal()
    }
}

/// A complete calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CostEstimate {
    pub totals: ResourceTotals,
    pub environment_size: EnvironmentSize,
    pub costs: CostBreakdown,
}

/// Sum per-metric demand across all requests.
///
/// Starts from zero, so an empty list yields all-zero totals.
pub fn sum_totals(requests: &[ResourceRequest]) -> ResourceTotals {
    requests.iter().fold(ResourceTotals::default(), |acc, r| {
        let quantity = r.quantity as f64;
        ResourceTotals {
            total_vcpu: acc.total_vcpu + quantity * r.vcpu,
            total_memory: acc.total_memory + quantity * r.memory,
            total_storage: acc.total_storage + quantity * r.storage,
        }
    })
}

/// Resolve the environment size for the given totals.
///
/// Escalation, not range matching: the size starts at Small and each check
/// below can raise it. The Large check runs regardless of whether the
/// Medium check fired, so a single metric that clears both the small and
/// medium upper limits lands on Large directly. Boundaries other than the
/// small and medium upper limits are not consulted.
pub fn resolve_environment_size(
    totals: &ResourceTotals,
    defs: &SizeDefinitions,
) -> EnvironmentSize {
    let mut size = EnvironmentSize::Small;

    if totals.total_vcpu > defs.small.vcpu.upper_limit
        || totals.total_memory > defs.small.memory.upper_limit
        || totals.total_storage > defs.small.storage.upper_limit
    {
        size = EnvironmentSize::Medium;
    }

    if totals.total_vcpu > defs.medium.vcpu.upper_limit
        || totals.total_memory > defs.medium.memory.upper_limit
        || totals.total_storage > defs.medium.storage.upper_limit
    {
        size = EnvironmentSize::Large;
    }

    size
}

fn monthly_for(totals: &ResourceTotals, rates: &ResourceRates) -> f64 {
    totals.total_vcpu * rates.vcpu
        + totals.total_memory * rates.memory
        + totals.total_storage * rates.storage
}

fn comparison_for(totals: &ResourceTotals, rates: &ResourceRates, surcharged_monthly: f64) -> ComparisonCost {
    let monthly = monthly_for(totals, rates);
    let savings_percent = if monthly == 0.0 {
        None
    } else {
        Some(((monthly - surcharged_monthly) / monthly * 100.0).round() as i64)
    };

    ComparisonCost {
        monthly,
        annual: monthly * 12.0,
        savings_percent,
    }
}

/// Compute the full cost estimate for a list of resource requests.
///
/// Inputs are assumed non-negative (enforced by request validation before
/// the engine runs). Deterministic: identical inputs produce identical
/// output. Only `fees.dla_fee` is composed into the surcharged
/// perspective; the lab manager fee is configured but inert.
pub fn calculate(requests: &[ResourceRequest], plan: &RatePlan) -> CostEstimate {
    let totals = sum_totals(requests);
    let environment_size = resolve_environment_size(&totals, &plan.environment_size_definitions);

    let rates = plan.monthly_cost.for_size(environment_size);
    let base_monthly = monthly_for(&totals, rates);
    let surcharged_monthly = base_monthly * (1.0 + plan.fees.dla_fee);

    let costs = CostBreakdown {
        base: Some(CostPeriod {
            monthly: base_monthly,
            annual: base_monthly * 12.0,
        }),
        surcharged: CostPeriod {
            monthly: surcharged_monthly,
            annual: surcharged_monthly * 12.0,
        },
        azure: comparison_for(&totals, &plan.cloud_costs.azure, surcharged_monthly),
        aws: comparison_for(&totals, &plan.cloud_costs.aws, surcharged_monthly),
    };

    CostEstimate {
        totals,
        environment_size,
        costs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceRates;

    const EPS: f64 = 1e-9;

    fn sandbox(quantity: u32) -> ResourceRequest {
        ResourceRequest {
            name: "Sandbox".to_string(),
            quantity,
            vcpu: 12.0,
            memory: 64.0,
            storage: 1024.0,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_request_list() {
        let plan = RatePlan::default();
        let estimate = calculate(&[], &plan);

        assert_eq!(estimate.totals, ResourceTotals::default());
        assert_eq!(estimate.environment_size, EnvironmentSize::Small);
        assert_close(estimate.costs.base.unwrap().monthly, 0.0);
        assert_close(estimate.costs.surcharged.monthly, 0.0);
    }

    #[test]
    fn test_single_sandbox_small_environment() {
        // 12 vCPU / 64 GB / 1024 GB stays below every small upper limit
        let plan = RatePlan::default();
        let estimate = calculate(&[sandbox(1)], &plan);

        assert_close(estimate.totals.total_vcpu, 12.0);
        assert_close(estimate.totals.total_memory, 64.0);
        assert_close(estimate.totals.total_storage, 1024.0);
        assert_eq!(estimate.environment_size, EnvironmentSize::Small);

        // 12 x 8.50 + 64 x 2.50 + 1024 x 0.06 = 102 + 160 + 61.44
        let base = estimate.costs.base.unwrap();
        assert_close(base.monthly, 323.44);
        assert_close(base.annual, 323.44 * 12.0);
    }

    #[test]
    fn test_doubled_quantity_escalates_to_medium() {
        // Storage doubles to 2048, above the small upper limit of 2000
        let plan = RatePlan::default();
        let estimate = calculate(&[sandbox(2)], &plan);

        assert_close(estimate.totals.total_vcpu, 24.0);
        assert_close(estimate.totals.total_memory, 128.0);
        assert_close(estimate.totals.total_storage, 2048.0);
        assert_eq!(estimate.environment_size, EnvironmentSize::Medium);

        // Medium-tier rates apply to the whole bill
        let base = estimate.costs.base.unwrap();
        assert_close(base.monthly, 24.0 * 7.50 + 128.0 * 1.60 + 2048.0 * 0.05);
    }

    #[test]
    fn test_surcharge_applies_dla_fee_only() {
        let plan = RatePlan::default();
        let estimate = calculate(&[sandbox(1)], &plan);

        assert_close(estimate.costs.surcharged.monthly, 323.44 * 1.11);
        assert_close(estimate.costs.surcharged.annual, 323.44 * 1.11 * 12.0);
    }

    #[test]
    fn test_lab_manager_fee_is_inert() {
        let mut plan = RatePlan::default();
        let before = calculate(&[sandbox(1)], &plan);

        plan.fees.wwt_lab_manager_fee = 0.99;
        let after = calculate(&[sandbox(1)], &plan);

        assert_eq!(before.costs, after.costs);
    }

    #[test]
    fn test_comparison_costs_and_savings() {
        let plan = RatePlan::default();
        let estimate = calculate(&[sandbox(1)], &plan);

        let azure_monthly = 12.0 * 9.50 + 64.0 * 9.40 + 1024.0 * 0.03;
        assert_close(estimate.costs.azure.monthly, azure_monthly);
        assert_close(estimate.costs.azure.annual, azure_monthly * 12.0);

        let surcharged = 323.44 * 1.11;
        let expected = ((azure_monthly - surcharged) / azure_monthly * 100.0).round() as i64;
        assert_eq!(estimate.costs.azure.savings_percent, Some(expected));
        assert!(estimate.costs.aws.savings_percent.is_some());
    }

    #[test]
    fn test_zero_provider_cost_yields_no_savings_percent() {
        let mut plan = RatePlan::default();
        plan.cloud_costs.azure = ResourceRates {
            vcpu: 0.0,
            memory: 0.0,
            storage: 0.0,
        };

        let estimate = calculate(&[sandbox(1)], &plan);
        assert_close(estimate.costs.azure.monthly, 0.0);
        assert_eq!(estimate.costs.azure.savings_percent, None);
        // The other provider is unaffected
        assert!(estimate.costs.aws.savings_percent.is_some());
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let plan = RatePlan::default();
        let requests = vec![sandbox(1), sandbox(3)];

        let first = calculate(&requests, &plan);
        let second = calculate(&requests, &plan);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sizing_boundary_is_exclusive() {
        let defs = RatePlan::default().environment_size_definitions;

        // Exactly at the small upper limit stays Small
        let at_limit = ResourceTotals {
            total_vcpu: 100.0,
            total_memory: 500.0,
            total_storage: 2000.0,
        };
        assert_eq!(
            resolve_environment_size(&at_limit, &defs),
            EnvironmentSize::Small
        );

        // One unit past any single metric escalates
        let past_vcpu = ResourceTotals {
            total_vcpu: 101.0,
            ..at_limit
        };
        assert_eq!(
            resolve_environment_size(&past_vcpu, &defs),
            EnvironmentSize::Medium
        );
    }

    #[test]
    fn test_sizing_skips_straight_to_large() {
        // A single metric clearing both upper limits lands on Large without
        // ever "being" Medium
        let defs = RatePlan::default().environment_size_definitions;
        let totals = ResourceTotals {
            total_vcpu: 0.0,
            total_memory: 0.0,
            total_storage: 50000.0,
        };
        assert_eq!(
            resolve_environment_size(&totals, &defs),
            EnvironmentSize::Large
        );
    }

    #[test]
    fn test_sizing_is_monotonic_per_metric() {
        let defs = RatePlan::default().environment_size_definitions;

        for base_vcpu in [0.0, 50.0, 100.0, 150.0, 301.0, 1000.0] {
            let lower = ResourceTotals {
                total_vcpu: base_vcpu,
                total_memory: 10.0,
                total_storage: 10.0,
            };
            let higher = ResourceTotals {
                total_vcpu: base_vcpu + 25.0,
                ..lower
            };
            assert!(
                resolve_environment_size(&lower, &defs)
                    <= resolve_environment_size(&higher, &defs),
                "size decreased when vCPU rose from {base_vcpu}"
            );
        }
    }

    #[test]
    fn test_filter_for_caller() {
        let plan = RatePlan::default();
        let estimate = calculate(&[sandbox(1)], &plan);

        let visible = filter_for_caller(estimate.costs, true);
        assert!(visible.base.is_some());

        let redacted = filter_for_caller(estimate.costs, false);
        assert!(redacted.base.is_none());
        // The remaining perspectives are untouched
        assert_eq!(redacted.surcharged, estimate.costs.surcharged);
        assert_eq!(redacted.azure, estimate.costs.azure);
    }

    #[test]
    fn test_redacted_breakdown_serializes_without_base() {
        let plan = RatePlan::default();
        let estimate = calculate(&[sandbox(1)], &plan);
        let redacted = filter_for_caller(estimate.costs, false);

        let json = serde_json::to_value(redacted).unwrap();
        assert!(json.get("base").is_none());
        assert!(json.get("surcharged").is_some());
        assert!(json.get("azure").is_some());
        assert!(json.get("aws").is_some());
    }

    #[test]
    fn test_request_validation_rejects_negative_metrics() {
        let mut request = sandbox(1);
        request.memory = -1.0;
        assert!(request.validate().is_err());

        let ok = sandbox(0);
        assert!(ok.validate().is_ok());
    }
}
