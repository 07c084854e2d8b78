//! Path extractor for UUID identifiers.

use crate::errors::{messages, ErrorResponse};
use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

/// Extracts a `{id}` path segment as a [`Uuid`].
///
/// A malformed id rejects with a structured 400 instead of axum's plain
/// text path rejection.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::UuidPath;
///
/// async fn get_configuration(UuidPath(id): UuidPath) {
///     // id is a parsed Uuid
/// }
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        let id = raw.parse::<Uuid>().map_err(|_| {
            let body = Json(ErrorResponse::new(
                messages::CODE_UUID,
                messages::INVALID_UUID,
            ));
            (StatusCode::BAD_REQUEST, body).into_response()
        })?;

        Ok(UuidPath(id))
    }
}
