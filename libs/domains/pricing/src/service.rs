use axum_helpers::CallerIdentity;
use std::sync::Arc;
use validator::Validate;

use crate::calculator::{self, CostEstimate, ResourceRequest, ResourceTotals};
use crate::error::{PricingError, PricingResult};
use crate::models::{EnvironmentSize, RatePlan, RatePlanDocument, RatePlanUpdate};
use crate::repository::RatePlanRepository;

/// Service for the rate plan document and cost calculations
#[derive(Clone)]
pub struct PricingService<R: RatePlanRepository> {
    repository: Arc<R>,
}

impl<R: RatePlanRepository> PricingService<R> {
    /// Create a new pricing service
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Read the rate plan, redacted according to the caller's role.
    ///
    /// Admin callers receive the full document; everyone else receives the
    /// view without the lab manager fee and updater.
    pub async fn rate_plan_for(&self, caller: &CallerIdentity) -> PricingResult<RatePlanDocument> {
        let plan = self.repository.get_or_init().await?;
        Ok(RatePlanDocument::for_caller(plan, caller.is_admin()))
    }

    /// Apply a group-wise partial update to the rate plan. Admin only.
    pub async fn update_rate_plan(
        &self,
        update: RatePlanUpdate,
        caller: &CallerIdentity,
    ) -> PricingResult<RatePlan> {
        let user_id = caller
            .user_id
            .ok_or_else(|| PricingError::Unauthorized("Authentication required".to_string()))?;

        if !caller.is_admin() {
            return Err(PricingError::Forbidden(
                "Admin role required to update the rate plan".to_string(),
            ));
        }

        let plan = self.repository.update(update, user_id).await?;

        tracing::info!(updated_by = %user_id, "Rate plan updated");
        Ok(plan)
    }

    /// Compute a cost estimate for the given resource requests.
    ///
    /// Validates every line item, runs the calculation engine against the
    /// current rate plan, and applies the visibility filter for the caller.
    /// Nothing is persisted.
    pub async fn calculate_costs(
        &self,
        requests: &[ResourceRequest],
        caller: &CallerIdentity,
    ) -> PricingResult<CostEstimate> {
        for request in requests {
            request
                .validate()
                .map_err(|e| PricingError::InvalidInput(e.to_string()))?;
        }

        let plan = self.repository.get_or_init().await?;

        let mut estimate = calculator::calculate(requests, &plan);
        estimate.costs = calculator::filter_for_caller(estimate.costs, caller.is_authenticated());

        Ok(estimate)
    }

    /// Resolve the environment size for already-summed totals.
    ///
    /// Exposed standalone so clients can preview the tier while composing
    /// an environment, without a full calculation round trip.
    pub async fn preview_environment_size(
        &self,
        totals: &ResourceTotals,
    ) -> PricingResult<EnvironmentSize> {
        let plan = self.repository.get_or_init().await?;
        Ok(calculator::resolve_environment_size(
            totals,
            &plan.environment_size_definitions,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRatePlanRepository;
    use uuid::Uuid;

    fn service_with_default_plan() -> PricingService<MockRatePlanRepository> {
        let mut mock_repo = MockRatePlanRepository::new();
        mock_repo
            .expect_get_or_init()
            .returning(|| Ok(RatePlan::default()));
        PricingService::new(mock_repo)
    }

    fn sandbox() -> ResourceRequest {
        ResourceRequest {
            name: "Sandbox".to_string(),
            quantity: 1,
            vcpu: 12.0,
            memory: 64.0,
            storage: 1024.0,
        }
    }

    #[tokio::test]
    async fn test_calculate_includes_base_for_authenticated_caller() {
        let service = service_with_default_plan();
        let caller = CallerIdentity::authenticated(Uuid::now_v7(), vec!["user".to_string()]);

        let estimate = service.calculate_costs(&[sandbox()], &caller).await.unwrap();
        assert!(estimate.costs.base.is_some());
        assert_eq!(estimate.environment_size, EnvironmentSize::Small);
    }

    #[tokio::test]
    async fn test_calculate_redacts_base_for_anonymous_caller() {
        let service = service_with_default_plan();
        let caller = CallerIdentity::anonymous();

        let estimate = service.calculate_costs(&[sandbox()], &caller).await.unwrap();
        assert!(estimate.costs.base.is_none());
        assert!(estimate.costs.surcharged.monthly > 0.0);
    }

    #[tokio::test]
    async fn test_calculate_rejects_negative_input() {
        let service = service_with_default_plan();
        let caller = CallerIdentity::anonymous();

        let mut bad = sandbox();
        bad.vcpu = -4.0;

        let result = service.calculate_costs(&[bad], &caller).await;
        assert!(matches!(result, Err(PricingError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_rate_plan_full_for_admin() {
        let service = service_with_default_plan();
        let admin = CallerIdentity::authenticated(Uuid::now_v7(), vec!["admin".to_string()]);

        let document = service.rate_plan_for(&admin).await.unwrap();
        assert!(matches!(document, RatePlanDocument::Full(_)));
    }

    #[tokio::test]
    async fn test_rate_plan_redacted_for_regular_user() {
        let service = service_with_default_plan();
        let user = CallerIdentity::authenticated(Uuid::now_v7(), vec!["user".to_string()]);

        let document = service.rate_plan_for(&user).await.unwrap();
        assert!(matches!(document, RatePlanDocument::Redacted(_)));
    }

    #[tokio::test]
    async fn test_update_requires_authentication() {
        let mut mock_repo = MockRatePlanRepository::new();
        mock_repo.expect_update().never();
        let service = PricingService::new(mock_repo);

        let result = service
            .update_rate_plan(RatePlanUpdate::default(), &CallerIdentity::anonymous())
            .await;
        assert!(matches!(result, Err(PricingError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_update_requires_admin_role() {
        let mut mock_repo = MockRatePlanRepository::new();
        mock_repo.expect_update().never();
        let service = PricingService::new(mock_repo);

        let user = CallerIdentity::authenticated(Uuid::now_v7(), vec!["user".to_string()]);
        let result = service
            .update_rate_plan(RatePlanUpdate::default(), &user)
            .await;
        assert!(matches!(result, Err(PricingError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_passes_through_for_admin() {
        let admin_id = Uuid::now_v7();
        let mut mock_repo = MockRatePlanRepository::new();
        mock_repo
            .expect_update()
            .withf(move |_, updated_by| *updated_by == admin_id)
            .returning(|update, updated_by| {
                let mut plan = RatePlan::default();
                plan.apply_update(update, updated_by);
                Ok(plan)
            });
        let service = PricingService::new(mock_repo);

        let admin = CallerIdentity::authenticated(admin_id, vec!["admin".to_string()]);
        let update = RatePlanUpdate {
            fees: Some(crate::models::Fees {
                wwt_lab_manager_fee: 0.20,
                dla_fee: 0.10,
            }),
            ..Default::default()
        };

        let plan = service.update_rate_plan(update, &admin).await.unwrap();
        assert_eq!(plan.fees.dla_fee, 0.10);
        assert_eq!(plan.updated_by, Some(admin_id));
    }

    #[tokio::test]
    async fn test_preview_environment_size() {
        let service = service_with_default_plan();

        let totals = ResourceTotals {
            total_vcpu: 24.0,
            total_memory: 128.0,
            total_storage: 2048.0,
        };
        let size = service.preview_environment_size(&totals).await.unwrap();
        assert_eq!(size, EnvironmentSize::Medium);
    }
}
