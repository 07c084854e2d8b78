use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PricingResult;
use crate::models::{RatePlan, RatePlanUpdate};

/// Repository trait for the singleton rate plan document.
///
/// Implementations own the "latest by update time" rule and materialize
/// the default plan when the store is empty; callers never see an empty
/// store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatePlanRepository: Send + Sync {
    /// Fetch the authoritative rate plan, creating the default plan first
    /// if none has been stored yet.
    async fn get_or_init(&self) -> PricingResult<RatePlan>;

    /// Apply a group-wise partial update to the authoritative plan and
    /// return the stored result.
    async fn update(&self, update: RatePlanUpdate, updated_by: Uuid) -> PricingResult<RatePlan>;
}
