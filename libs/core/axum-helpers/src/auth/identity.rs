//! Explicit caller identity.
//!
//! The identity of the caller is resolved exactly once per request by
//! [`caller_identity_middleware`] and stored in the request extensions.
//! Handlers receive it through the [`CallerIdentity`] extractor (never
//! rejects, anonymous when no valid token was presented) or
//! [`AuthenticatedCaller`] (rejects with 401 for anonymous callers), and
//! pass it into domain services as a plain value.

use super::jwt::{JwtAuth, JwtClaims};
use crate::errors::{messages, ErrorResponse};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

/// Role name granting administrative access.
pub const ADMIN_ROLE: &str = "admin";

/// Who is making the request.
///
/// Anonymous callers have `user_id == None` and no roles.
#[derive(Clone, Debug, Default)]
pub struct CallerIdentity {
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub roles: Vec<String>,
}

impl CallerIdentity {
    /// An unauthenticated caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build an identity from verified JWT claims.
    ///
    /// Returns anonymous when the subject is not a valid UUID (a token from
    /// a previous incompatible deployment, for example).
    pub fn from_claims(claims: &JwtClaims) -> Self {
        match claims.sub.parse::<Uuid>() {
            Ok(user_id) => Self {
                user_id: Some(user_id),
                email: Some(claims.email.clone()),
                name: Some(claims.name.clone()),
                roles: claims.roles.clone(),
            },
            Err(_) => {
                tracing::warn!("JWT subject is not a UUID, treating caller as anonymous");
                Self::anonymous()
            }
        }
    }

    /// Construct an authenticated identity directly (tests, internal jobs).
    pub fn authenticated(user_id: Uuid, roles: Vec<String>) -> Self {
        Self {
            user_id: Some(user_id),
            email: None,
            name: None,
            roles,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }
}

/// Extract JWT from Authorization header or cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    // Try Authorization header first: "Bearer <token>"
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            // Fallback to cookie: "access_token=<token>"
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
                        if parts.len() == 2 && parts[0] == "access_token" {
                            Some(parts[1].to_string())
                        } else {
                            None
                        }
                    })
                })
        })
}

/// Identity-resolving middleware.
///
/// Verifies a bearer token when one is present and stores the resulting
/// [`CallerIdentity`] in the request extensions. Requests without a token, or
/// with an invalid one, proceed as anonymous; individual routes decide
/// whether anonymous access is acceptable.
pub async fn caller_identity_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = match extract_token_from_request(request.headers()) {
        Some(token) => match auth.verify_token(&token) {
            Ok(claims) => CallerIdentity::from_claims(&claims),
            Err(e) => {
                tracing::debug!("JWT verification failed: {}", e);
                CallerIdentity::anonymous()
            }
        },
        None => CallerIdentity::anonymous(),
    };

    request.extensions_mut().insert(identity);
    next.run(request).await
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Anonymous when the identity middleware is not installed on this route
        Ok(parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .unwrap_or_else(CallerIdentity::anonymous))
    }
}

/// Extractor that rejects anonymous callers with 401.
pub struct AuthenticatedCaller(pub CallerIdentity);

impl<S> FromRequestParts<S> for AuthenticatedCaller
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = match CallerIdentity::from_request_parts(parts, state).await {
            Ok(identity) => identity,
            Err(never) => match never {},
        };

        if identity.is_authenticated() {
            Ok(AuthenticatedCaller(identity))
        } else {
            let body = Json(ErrorResponse::new(
                messages::CODE_UNAUTHORIZED,
                messages::UNAUTHORIZED,
            ));
            Err((StatusCode::UNAUTHORIZED, body).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtClaims;

    fn claims_for(sub: &str, roles: &[&str]) -> JwtClaims {
        JwtClaims {
            sub: sub.to_string(),
            email: "dev@example.com".to_string(),
            name: "Dev".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
            iat: 0,
            jti: "test".to_string(),
        }
    }

    #[test]
    fn test_anonymous_identity() {
        let identity = CallerIdentity::anonymous();
        assert!(!identity.is_authenticated());
        assert!(!identity.is_admin());
    }

    #[test]
    fn test_identity_from_claims() {
        let user_id = Uuid::new_v4();
        let identity = CallerIdentity::from_claims(&claims_for(&user_id.to_string(), &["user"]));
        assert!(identity.is_authenticated());
        assert_eq!(identity.user_id, Some(user_id));
        assert!(!identity.is_admin());
    }

    #[test]
    fn test_identity_admin_role() {
        let user_id = Uuid::new_v4();
        let identity =
            CallerIdentity::from_claims(&claims_for(&user_id.to_string(), &["user", "admin"]));
        assert!(identity.is_admin());
    }

    #[test]
    fn test_identity_non_uuid_subject_is_anonymous() {
        let identity = CallerIdentity::from_claims(&claims_for("not-a-uuid", &["admin"]));
        assert!(!identity.is_authenticated());
        assert!(!identity.is_admin());
    }

    #[test]
    fn test_extract_token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer token-123".parse().unwrap());
        assert_eq!(
            extract_token_from_request(&headers),
            Some("token-123".to_string())
        );
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", "theme=dark; access_token=abc".parse().unwrap());
        assert_eq!(extract_token_from_request(&headers), Some("abc".to_string()));
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_token_from_request(&headers), None);
    }
}
