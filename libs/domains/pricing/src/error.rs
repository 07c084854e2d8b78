use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur in the pricing domain
#[derive(Debug, Error)]
pub enum PricingError {
    /// Rate plan missing and a default could not be materialized
    #[error("Rate plan not found: {0}")]
    NotFound(String),

    /// Malformed calculation input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Caller is not authenticated
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller lacks the required role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PricingError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            PricingError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            PricingError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            PricingError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            PricingError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            PricingError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}
