//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the LaaS API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LaaS Cost Calculator API",
        version = "0.1.0",
        description = "Lab-as-a-Service budgetary cost calculator: rate plans, cost estimates, and saved configurations"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/auth", api = domain_users::handlers::ApiDoc),
        (path = "/api/pricing", api = domain_pricing::handlers::ApiDoc),
        (path = "/api/configurations", api = domain_configurations::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
