use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
    CallerIdentity,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::{
    calculator::{CostEstimate, ResourceRequest, ResourceTotals},
    error::PricingResult,
    models::{EnvironmentSize, RatePlanUpdate},
    repository::RatePlanRepository,
    service::PricingService,
};

/// OpenAPI documentation for the pricing API
#[derive(OpenApi)]
#[openapi(
    paths(get_rate_plan, update_rate_plan, calculate_costs, preview_environment_size),
    components(
        schemas(
            RatePlanUpdate,
            CalculateCostsRequest,
            CostEstimate,
            ResourceRequest,
            ResourceTotals,
            SizePreviewResponse
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "pricing", description = "Rate plan and cost calculation endpoints")
    )
)]
pub struct ApiDoc;

/// Request body for a cost calculation
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateCostsRequest {
    pub resource_requests: Vec<ResourceRequest>,
}

/// Response body for an environment size preview
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SizePreviewResponse {
    pub environment_size: EnvironmentSize,
}

/// Create Axum router for pricing endpoints
pub fn router<R>(service: PricingService<R>) -> Router
where
    R: RatePlanRepository + 'static,
{
    let service = Arc::new(service);

    Router::new()
        .route("/", get(get_rate_plan).put(update_rate_plan))
        .route("/calculate", post(calculate_costs))
        .route("/environment-size", post(preview_environment_size))
        .with_state(service)
}

/// Read the current rate plan
///
/// Admin callers receive the full document; other callers receive a view
/// with the internal lab manager fee redacted.
#[utoipa::path(
    get,
    path = "",
    tag = "pricing",
    responses(
        (status = 200, description = "Current rate plan"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_rate_plan<R>(
    State(service): State<Arc<PricingService<R>>>,
    caller: CallerIdentity,
) -> PricingResult<impl IntoResponse>
where
    R: RatePlanRepository,
{
    let document = service.rate_plan_for(&caller).await?;
    Ok(Json(document))
}

/// Update the rate plan (admin only)
///
/// Groups present in the body replace the stored groups wholesale; absent
/// groups are left untouched.
#[utoipa::path(
    put,
    path = "",
    tag = "pricing",
    request_body = RatePlanUpdate,
    responses(
        (status = 200, description = "Rate plan updated"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_rate_plan<R>(
    State(service): State<Arc<PricingService<R>>>,
    caller: CallerIdentity,
    Json(update): Json<RatePlanUpdate>,
) -> PricingResult<impl IntoResponse>
where
    R: RatePlanRepository,
{
    let plan = service.update_rate_plan(update, &caller).await?;
    Ok(Json(plan))
}

/// Calculate costs for a list of resource requests
///
/// Works for anonymous callers too; the internal cost perspective is only
/// included when the caller is authenticated.
#[utoipa::path(
    post,
    path = "/calculate",
    tag = "pricing",
    request_body = CalculateCostsRequest,
    responses(
        (status = 200, description = "Cost estimate", body = CostEstimate),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn calculate_costs<R>(
    State(service): State<Arc<PricingService<R>>>,
    caller: CallerIdentity,
    Json(request): Json<CalculateCostsRequest>,
) -> PricingResult<impl IntoResponse>
where
    R: RatePlanRepository,
{
    let estimate = service
        .calculate_costs(&request.resource_requests, &caller)
        .await?;
    Ok(Json(estimate))
}

/// Resolve the environment size for pre-summed totals
///
/// Standalone preview for clients composing an environment; no costs are
/// computed.
#[utoipa::path(
    post,
    path = "/environment-size",
    tag = "pricing",
    request_body = ResourceTotals,
    responses(
        (status = 200, description = "Resolved environment size", body = SizePreviewResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn preview_environment_size<R>(
    State(service): State<Arc<PricingService<R>>>,
    Json(totals): Json<ResourceTotals>,
) -> PricingResult<impl IntoResponse>
where
    R: RatePlanRepository,
{
    let environment_size = service.preview_environment_size(&totals).await?;
    Ok(Json(SizePreviewResponse { environment_size }))
}
