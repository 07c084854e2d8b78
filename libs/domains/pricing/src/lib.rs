//! Pricing Domain
//!
//! Rate plan management and the cost calculation engine for LaaS
//! environments.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Role checks, validation, visibility filtering
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │ Repository  │     │ Calculator  │  ← Pure cost engine + sizing rule
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Rate plan document, DTOs
//! └─────────────┘
//! ```
//!
//! The calculator is a set of pure functions: summing resource totals,
//! resolving the environment size tier, and producing the four-perspective
//! cost breakdown. The repository owns the singleton rate plan document
//! and materializes the default plan on first access.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_pricing::{handlers, PgRatePlanRepository, PricingService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let repository = PgRatePlanRepository::new(db);
//! let service = PricingService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod calculator;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use calculator::{
    calculate, filter_for_caller, resolve_environment_size, sum_totals, ComparisonCost,
    CostBreakdown, CostEstimate, CostPeriod, ResourceRequest, ResourceTotals,
};
pub use error::{PricingError, PricingResult};
pub use models::{
    CloudCosts, EnvironmentSize, Fees, MonthlyCost, RatePlan, RatePlanDocument, RatePlanUpdate,
    RatePlanView, ResourceRates, SizeBoundaries, SizeDefinitions, TierBoundary,
};
pub use postgres::PgRatePlanRepository;
pub use repository::RatePlanRepository;
pub use service::PricingService;
