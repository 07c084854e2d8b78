use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
    extractors::ValidatedJson,
    AuthenticatedCaller,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::{
    error::{UserError, UserResult},
    models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse},
    repository::UserRepository,
    service::UserService,
};

/// OpenAPI documentation for the auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, me),
    components(
        schemas(RegisterRequest, LoginRequest, AuthResponse, UserResponse),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "auth", description = "Account registration and authentication endpoints")
    )
)]
pub struct ApiDoc;

/// Create Axum router for auth endpoints
pub fn router<R>(service: UserService<R>) -> Router
where
    R: UserRepository + 'static,
{
    let service = Arc::new(service);

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(service)
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse>
where
    R: UserRepository,
{
    let response = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with username or email
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<impl IntoResponse>
where
    R: UserRepository,
{
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn me<R>(
    State(service): State<Arc<UserService<R>>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
) -> UserResult<impl IntoResponse>
where
    R: UserRepository,
{
    let user_id = caller.user_id.ok_or(UserError::Unauthorized)?;
    let profile = service.me(user_id).await?;
    Ok(Json(profile))
}
