use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Configuration not found: {0}")]
    NotFound(Uuid),

    #[error("No configuration for share token '{0}'")]
    ShareTokenNotFound(String),

    #[error("Invalid version index {index}: configuration has {len} versions")]
    InvalidVersionIndex { index: usize, len: usize },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not authorized to access this configuration")]
    Forbidden,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ConfigurationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Configuration {} not found", id),
            ),
            Self::ShareTokenNotFound(_) => {
                (StatusCode::NOT_FOUND, "Configuration not found".to_string())
            }
            Self::InvalidVersionIndex { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
