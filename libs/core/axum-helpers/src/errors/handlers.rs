use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{messages, ErrorResponse};

/// Fallback handler for routes that match nothing.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::new(
        messages::CODE_NOT_FOUND,
        "The requested resource was not found",
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}
