use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    extractors::{UuidPath, ValidatedJson},
    AuthenticatedCaller,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::{
    error::ConfigurationResult,
    models::{ConfigVersion, Configuration, CreateConfiguration, UpdateConfiguration, VersionInput},
    repository::ConfigurationRepository,
    service::ConfigurationService,
};

/// OpenAPI documentation for the configurations API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_configurations,
        list_public_configurations,
        get_by_share_token,
        get_configuration,
        create_configuration,
        update_configuration,
        revert_configuration,
        delete_configuration,
    ),
    components(
        schemas(
            Configuration,
            ConfigVersion,
            CreateConfiguration,
            UpdateConfiguration,
            VersionInput,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "configurations", description = "Saved configuration management endpoints")
    )
)]
pub struct ApiDoc;

/// Message response for delete operations
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create Axum router for configuration endpoints
pub fn router<R>(service: ConfigurationService<R>) -> Router
where
    R: ConfigurationRepository + 'static,
{
    let service = Arc::new(service);

    Router::new()
        .route("/", post(create_configuration).get(list_configurations))
        .route("/public", get(list_public_configurations))
        .route("/share/{token}", get(get_by_share_token))
        .route(
            "/{id}",
            get(get_configuration)
                .put(update_configuration)
                .delete(delete_configuration),
        )
        .route("/{id}/revert/{version_index}", put(revert_configuration))
        .with_state(service)
}

/// List the caller's configurations (admins see all)
#[utoipa::path(
    get,
    path = "",
    tag = "configurations",
    responses(
        (status = 200, description = "Configurations visible to the caller", body = Vec<Configuration>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_configurations<R>(
    State(service): State<Arc<ConfigurationService<R>>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
) -> ConfigurationResult<impl IntoResponse>
where
    R: ConfigurationRepository,
{
    let configurations = service.list_for(&caller).await?;
    Ok(Json(configurations))
}

/// List public configurations
#[utoipa::path(
    get,
    path = "/public",
    tag = "configurations",
    responses(
        (status = 200, description = "Public configurations", body = Vec<Configuration>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_public_configurations<R>(
    State(service): State<Arc<ConfigurationService<R>>>,
) -> ConfigurationResult<impl IntoResponse>
where
    R: ConfigurationRepository,
{
    let configurations = service.list_public().await?;
    Ok(Json(configurations))
}

/// Look up a configuration by its share token
#[utoipa::path(
    get,
    path = "/share/{token}",
    tag = "configurations",
    params(
        ("token" = String, Path, description = "Share token")
    ),
    responses(
        (status = 200, description = "Shared configuration", body = Configuration),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_share_token<R>(
    State(service): State<Arc<ConfigurationService<R>>>,
    Path(token): Path<String>,
) -> ConfigurationResult<impl IntoResponse>
where
    R: ConfigurationRepository,
{
    let configuration = service.get_by_share_token(&token).await?;
    Ok(Json(configuration))
}

/// Get a configuration by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "configurations",
    params(
        ("id" = Uuid, Path, description = "Configuration ID")
    ),
    responses(
        (status = 200, description = "Configuration found", body = Configuration),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_configuration<R>(
    State(service): State<Arc<ConfigurationService<R>>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    UuidPath(id): UuidPath,
) -> ConfigurationResult<impl IntoResponse>
where
    R: ConfigurationRepository,
{
    let configuration = service.get(id, &caller).await?;
    Ok(Json(configuration))
}

/// Create a new configuration with its initial version
#[utoipa::path(
    post,
    path = "",
    tag = "configurations",
    request_body = CreateConfiguration,
    responses(
        (status = 201, description = "Configuration created", body = Configuration),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_configuration<R>(
    State(service): State<Arc<ConfigurationService<R>>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    ValidatedJson(input): ValidatedJson<CreateConfiguration>,
) -> ConfigurationResult<impl IntoResponse>
where
    R: ConfigurationRepository,
{
    let configuration = service.create(input, &caller).await?;
    Ok((StatusCode::CREATED, Json(configuration)))
}

/// Update metadata and/or append a new version
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "configurations",
    params(
        ("id" = Uuid, Path, description = "Configuration ID")
    ),
    request_body = UpdateConfiguration,
    responses(
        (status = 200, description = "Configuration updated", body = Configuration),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_configuration<R>(
    State(service): State<Arc<ConfigurationService<R>>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    UuidPath(id): UuidPath,
    ValidatedJson(update): ValidatedJson<UpdateConfiguration>,
) -> ConfigurationResult<impl IntoResponse>
where
    R: ConfigurationRepository,
{
    let configuration = service.update(id, update, &caller).await?;
    Ok(Json(configuration))
}

/// Revert the current version to a history entry
#[utoipa::path(
    put,
    path = "/{id}/revert/{version_index}",
    tag = "configurations",
    params(
        ("id" = Uuid, Path, description = "Configuration ID"),
        ("version_index" = usize, Path, description = "Zero-based index into the version history")
    ),
    responses(
        (status = 200, description = "Configuration reverted", body = Configuration),
        (status = 400, description = "Version index out of range"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn revert_configuration<R>(
    State(service): State<Arc<ConfigurationService<R>>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    Path((id, version_index)): Path<(Uuid, usize)>,
) -> ConfigurationResult<impl IntoResponse>
where
    R: ConfigurationRepository,
{
    let configuration = service.revert(id, version_index, &caller).await?;
    Ok(Json(configuration))
}

/// Delete a configuration (hard delete, non-recoverable)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "configurations",
    params(
        ("id" = Uuid, Path, description = "Configuration ID")
    ),
    responses(
        (status = 200, description = "Configuration deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_configuration<R>(
    State(service): State<Arc<ConfigurationService<R>>>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
    UuidPath(id): UuidPath,
) -> ConfigurationResult<impl IntoResponse>
where
    R: ConfigurationRepository,
{
    service.delete(id, &caller).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Configuration deleted successfully".to_string(),
        }),
    ))
}
