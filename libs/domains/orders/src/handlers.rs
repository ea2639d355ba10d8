//! HTTP handlers for Orders API

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

use domain_products::ProductRepository;

use crate::error::OrderResult;
use crate::models::{CreateOrder, Order, OrderFilter, OrderStatus, OrderUpdate};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for Orders API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_orders,
        query_orders,
        create_order,
        update_orders,
        delete_orders,
        get_order,
        update_order,
        delete_order,
    ),
    components(
        schemas(
            Order, CreateOrder, OrderFilter, OrderUpdate, OrderStatus,
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
        (name = "Orders", description = "Client orders and their carts")
    )
)]
pub struct ApiDoc;

/// Create the orders router with all HTTP endpoints
pub fn router<R, P>(service: OrderService<R, P>) -> Router
where
    R: OrderRepository + 'static,
    P: ProductRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_orders)
                .post(create_order)
                .patch(update_orders)
                .delete(delete_orders),
        )
        .route("/query", post(query_orders))
        .route(
            "/{id}",
            get(get_order)
                .patch(update_order)
                .delete(delete_order),
        )
        .with_state(shared_service)
}

/// List orders, optionally paged
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    params(Page),
    responses(
        (status = 200, description = "Orders and the total count", body = CollectionResponse<Order>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    Query(page): Query<Page>,
) -> OrderResult<CollectionResponse<Order>> {
    service.list_orders(page).await
}

/// Filter, sort and page orders
#[utoipa::path(
    post,
    path = "/query",
    tag = "Orders",
    request_body = ListQuery<OrderFilter>,
    responses(
        (status = 200, description = "Matching orders and the total match count", body = CollectionResponse<Order>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn query_orders<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    JsonBody(query): JsonBody<ListQuery<OrderFilter>>,
) -> OrderResult<CollectionResponse<Order>> {
    service.query_orders(query).await
}

/// Place an order; every cart product must exist
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = CollectionResponse<Order>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<CollectionResponse<Order>> {
    service.create_order(input).await
}

/// Update every order matching a filter
#[utoipa::path(
    patch,
    path = "",
    tag = "Orders",
    request_body = UpdateManyRequest<OrderFilter, OrderUpdate>,
    responses(
        (status = 200, description = "Number of orders updated", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_orders<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    JsonBody(request): JsonBody<UpdateManyRequest<OrderFilter, OrderUpdate>>,
) -> OrderResult<CommandResponse> {
    let result = service.update_orders(request).await?;
    Ok(result.into())
}

/// Delete every order matching a filter
#[utoipa::path(
    delete,
    path = "",
    tag = "Orders",
    request_body = FilterRequest<OrderFilter>,
    responses(
        (status = 200, description = "Number of orders deleted", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_orders<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    JsonBody(request): JsonBody<FilterRequest<OrderFilter>>,
) -> OrderResult<CommandResponse> {
    let result = service.delete_orders(request).await?;
    Ok(result.into())
}

/// Get an order by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = CollectionResponse<Order>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    IdPath(id): IdPath,
) -> OrderResult<CollectionResponse<Order>> {
    service.get_order(&id).await
}

/// Update an order
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateRequest<OrderUpdate>,
    responses(
        (status = 200, description = "Order as stored after the update", body = CollectionResponse<Order>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<UpdateRequest<OrderUpdate>>,
) -> OrderResult<CollectionResponse<Order>> {
    service.update_order(&id, request).await
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order deleted", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<R, P>>>,
    IdPath(id): IdPath,
) -> OrderResult<CommandResponse> {
    let result = service.delete_order(&id).await?;
    Ok(result.into())
}
