use axum::Router;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Each domain router applies its own service state; only cheap Arc
/// clones of the connection pool remain here.
pub fn routes(state: &crate::state::AppState) -> Router {
    let pricing = {
        let repository = domain_pricing::PgRatePlanRepository::new(state.db.clone());
        domain_pricing::handlers::router(domain_pricing::PricingService::new(repository))
    };

    let configurations = {
        let repository = domain_configurations::PgConfigurationRepository::new(state.db.clone());
        domain_configurations::handlers::router(domain_configurations::ConfigurationService::new(
            repository,
        ))
    };

    let auth = {
        let repository = domain_users::PgUserRepository::new(state.db.clone());
        domain_users::handlers::router(domain_users::UserService::new(
            repository,
            state.jwt_auth.clone(),
        ))
    };

    Router::new()
        .nest("/auth", auth)
        .nest("/pricing", pricing)
        .nest("/configurations", configurations)
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
