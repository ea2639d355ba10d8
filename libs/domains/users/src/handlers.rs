//! HTTP handlers for Users API

use axum::{
    Router,
    extract::{Query, State},
    routing::{get, post},
};
use axum_helpers::{
    IdPath, JsonBody, ValidatedJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use resource_query::{
    CollectionResponse, CommandResponse, CommandResult, FilterRequest, ListQuery, Page, Sort,
    Timestamps, UpdateManyRequest, UpdateRequest,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, UserFilter, UserResponse, UserUpdate};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        query_users,
        create_user,
        update_users,
        delete_users,
        get_user,
        update_user,
        delete_user,
    ),
    components(
        schemas(
            UserResponse, CreateUser, UserFilter, UserUpdate,
            Timestamps, Sort, Page,
            CommandResult, CommandResponse
        ),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .patch(update_users)
                .delete(delete_users),
        )
        .route("/query", post(query_users))
        .route(
            "/{id}",
            get(get_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .with_state(shared_service)
}

/// List users, optionally paged
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    params(Page),
    responses(
        (status = 200, description = "Users and the total count", body = CollectionResponse<UserResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Query(page): Query<Page>,
) -> UserResult<CollectionResponse<UserResponse>> {
    service.list_users(page).await
}

/// Filter, sort and page users
#[utoipa::path(
    post,
    path = "/query",
    tag = "Users",
    request_body = ListQuery<UserFilter>,
    responses(
        (status = 200, description = "Matching users and the total match count", body = CollectionResponse<UserResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn query_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(query): JsonBody<ListQuery<UserFilter>>,
) -> UserResult<CollectionResponse<UserResponse>> {
    service.query_users(query).await
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = CollectionResponse<UserResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<CollectionResponse<UserResponse>> {
    service.create_user(input).await
}

/// Update every user matching a filter
#[utoipa::path(
    patch,
    path = "",
    tag = "Users",
    request_body = UpdateManyRequest<UserFilter, UserUpdate>,
    responses(
        (status = 200, description = "Number of users updated", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(request): JsonBody<UpdateManyRequest<UserFilter, UserUpdate>>,
) -> UserResult<CommandResponse> {
    let result = service.update_users(request).await?;
    Ok(result.into())
}

/// Delete every user matching a filter
#[utoipa::path(
    delete,
    path = "",
    tag = "Users",
    request_body = FilterRequest<UserFilter>,
    responses(
        (status = 200, description = "Number of users deleted", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(request): JsonBody<FilterRequest<UserFilter>>,
) -> UserResult<CommandResponse> {
    let result = service.delete_users(request).await?;
    Ok(result.into())
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = CollectionResponse<UserResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<CollectionResponse<UserResponse>> {
    service.get_user(&id).await
}

/// Update a user
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateRequest<UserUpdate>,
    responses(
        (status = 200, description = "User as stored after the update", body = CollectionResponse<UserResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<UpdateRequest<UserUpdate>>,
) -> UserResult<CollectionResponse<UserResponse>> {
    service.update_user(&id, request).await
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<CommandResponse> {
    let result = service.delete_user(&id).await?;
    Ok(result.into())
}
