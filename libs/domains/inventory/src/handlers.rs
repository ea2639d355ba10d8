//! HTTP handlers for Inventory API

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
    CollectionResponse, CommandResponse, CommandResult, FilterRequest, ListQuery, NumberRange,
    Page, Sort, Timestamps, UpdateManyRequest, UpdateRequest,
};
use std::sync::Arc;
use utoipa::OpenApi;

use domain_products::ProductRepository;

use crate::error::InventoryResult;
use crate::models::{CreateInventoryRecord, InventoryFilter, InventoryRecord, InventoryUpdate};
use crate::repository::InventoryRepository;
use crate::service::InventoryService;

/// OpenAPI documentation for Inventory API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_records,
        query_records,
        create_record,
        update_records,
        delete_records,
        get_record,
        update_record,
        delete_record,
    ),
    components(
        schemas(
            InventoryRecord, CreateInventoryRecord, InventoryFilter, InventoryUpdate,
            NumberRange, Timestamps, Sort, Page,
            CommandResult, CommandResponse
        ),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Inventory", description = "Stock levels per product")
    )
)]
pub struct ApiDoc;

/// Create the inventory router; records are addressed by product id
pub fn router<R, P>(service: InventoryService<R, P>) -> Router
where
    R: InventoryRepository + 'static,
    P: ProductRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_records)
                .post(create_record)
                .patch(update_records)
                .delete(delete_records),
        )
        .route("/query", post(query_records))
        .route(
            "/{id}",
            get(get_record)
                .patch(update_record)
                .delete(delete_record),
        )
        .with_state(shared_service)
}

/// List inventory records, optionally paged
#[utoipa::path(
    get,
    path = "",
    tag = "Inventory",
    params(Page),
    responses(
        (status = 200, description = "Records and the total count", body = CollectionResponse<InventoryRecord>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_records<R: InventoryRepository, P: ProductRepository>(
    State(service): State<Arc<InventoryService<R, P>>>,
    Query(page): Query<Page>,
) -> InventoryResult<CollectionResponse<InventoryRecord>> {
    service.list_records(page).await
}

/// Filter, sort and page inventory records
#[utoipa::path(
    post,
    path = "/query",
    tag = "Inventory",
    request_body = ListQuery<InventoryFilter>,
    responses(
        (status = 200, description = "Matching records and the total match count", body = CollectionResponse<InventoryRecord>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn query_records<R: InventoryRepository, P: ProductRepository>(
    State(service): State<Arc<InventoryService<R, P>>>,
    JsonBody(query): JsonBody<ListQuery<InventoryFilter>>,
) -> InventoryResult<CollectionResponse<InventoryRecord>> {
    service.query_records(query).await
}

/// Create the inventory record of an existing product
#[utoipa::path(
    post,
    path = "",
    tag = "Inventory",
    request_body = CreateInventoryRecord,
    responses(
        (status = 201, description = "Record created", body = CollectionResponse<InventoryRecord>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_record<R: InventoryRepository, P: ProductRepository>(
    State(service): State<Arc<InventoryService<R, P>>>,
    ValidatedJson(input): ValidatedJson<CreateInventoryRecord>,
) -> InventoryResult<CollectionResponse<InventoryRecord>> {
    service.create_record(input).await
}

/// Update every record matching a filter
#[utoipa::path(
    patch,
    path = "",
    tag = "Inventory",
    request_body = UpdateManyRequest<InventoryFilter, InventoryUpdate>,
    responses(
        (status = 200, description = "Number of records updated", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_records<R: InventoryRepository, P: ProductRepository>(
    State(service): State<Arc<InventoryService<R, P>>>,
    JsonBody(request): JsonBody<UpdateManyRequest<InventoryFilter, InventoryUpdate>>,
) -> InventoryResult<CommandResponse> {
    let result = service.update_records(request).await?;
    Ok(result.into())
}

/// Delete every record matching a filter
#[utoipa::path(
    delete,
    path = "",
    tag = "Inventory",
    request_body = FilterRequest<InventoryFilter>,
    responses(
        (status = 200, description = "Number of records deleted", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_records<R: InventoryRepository, P: ProductRepository>(
    State(service): State<Arc<InventoryService<R, P>>>,
    JsonBody(request): JsonBody<FilterRequest<InventoryFilter>>,
) -> InventoryResult<CommandResponse> {
    let result = service.delete_records(request).await?;
    Ok(result.into())
}

/// Get the record of a product
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Inventory",
    params(
        ("id" = String, Path, description = "Product ID the record counts")
    ),
    responses(
        (status = 200, description = "Record found", body = CollectionResponse<InventoryRecord>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_record<R: InventoryRepository, P: ProductRepository>(
    State(service): State<Arc<InventoryService<R, P>>>,
    IdPath(id): IdPath,
) -> InventoryResult<CollectionResponse<InventoryRecord>> {
    service.get_record(&id).await
}

/// Update the record of a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Inventory",
    params(
        ("id" = String, Path, description = "Product ID the record counts")
    ),
    request_body = UpdateRequest<InventoryUpdate>,
    responses(
        (status = 200, description = "Record as stored after the update", body = CollectionResponse<InventoryRecord>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_record<R: InventoryRepository, P: ProductRepository>(
    State(service): State<Arc<InventoryService<R, P>>>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<UpdateRequest<InventoryUpdate>>,
) -> InventoryResult<CollectionResponse<InventoryRecord>> {
    service.update_record(&id, request).await
}

/// Delete the record of a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Inventory",
    params(
        ("id" = String, Path, description = "Product ID the record counts")
    ),
    responses(
        (status = 200, description = "Record deleted", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_record<R: InventoryRepository, P: ProductRepository>(
    State(service): State<Arc<InventoryService<R, P>>>,
    IdPath(id): IdPath,
) -> InventoryResult<CommandResponse> {
    let result = service.delete_record(&id).await?;
    Ok(result.into())
}
