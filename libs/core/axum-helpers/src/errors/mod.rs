pub mod handlers;
pub mod messages;
pub mod responses;

use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every failing endpoint.
///
/// - `error`: machine-readable error identifier (e.g., "NOT_FOUND")
/// - `message`: human-readable error message
/// - `details`: optional structured details (e.g., per-field validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "details": {"name": [{"code": "length"}]}
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_without_details() {
        let body = ErrorResponse::new(messages::CODE_NOT_FOUND, "Configuration not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
        assert_eq!(json["message"], "Configuration not found");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let body = ErrorResponse::new(messages::CODE_VALIDATION, messages::VALIDATION_FAILED)
            .with_details(serde_json::json!({"quantity": ["out of range"]}));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["details"]["quantity"][0], "out of range");
    }
}
