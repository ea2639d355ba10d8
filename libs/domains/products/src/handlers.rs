//! HTTP handlers for Products API

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

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, Product, ProductCategory, ProductFilter, ProductType, ProductUpdate,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        query_products,
        create_product,
        update_products,
        delete_products,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, ProductFilter, ProductUpdate,
            ProductType, ProductCategory, NumberRange, Timestamps, Sort, Page,
            CommandResult, CommandResponse
        ),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .patch(update_products)
                .delete(delete_products),
        )
        .route("/query", post(query_products))
        .route(
            "/{id}",
            get(get_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products, optionally paged
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(Page),
    responses(
        (status = 200, description = "Products and the total count", body = CollectionResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(page): Query<Page>,
) -> ProductResult<CollectionResponse<Product>> {
    service.list_products(page).await
}

/// Filter, sort and page products
#[utoipa::path(
    post,
    path = "/query",
    tag = "Products",
    request_body = ListQuery<ProductFilter>,
    responses(
        (status = 200, description = "Matching products and the total match count", body = CollectionResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn query_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(query): JsonBody<ListQuery<ProductFilter>>,
) -> ProductResult<CollectionResponse<Product>> {
    service.query_products(query).await
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = CollectionResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<CollectionResponse<Product>> {
    service.create_product(input).await
}

/// Update every product matching a filter
#[utoipa::path(
    patch,
    path = "",
    tag = "Products",
    request_body = UpdateManyRequest<ProductFilter, ProductUpdate>,
    responses(
        (status = 200, description = "Number of products updated", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(request): JsonBody<UpdateManyRequest<ProductFilter, ProductUpdate>>,
) -> ProductResult<CommandResponse> {
    let result = service.update_products(request).await?;
    Ok(result.into())
}

/// Delete every product matching a filter
#[utoipa::path(
    delete,
    path = "",
    tag = "Products",
    request_body = FilterRequest<ProductFilter>,
    responses(
        (status = 200, description = "Number of products deleted", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(request): JsonBody<FilterRequest<ProductFilter>>,
) -> ProductResult<CommandResponse> {
    let result = service.delete_products(request).await?;
    Ok(result.into())
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = CollectionResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<CollectionResponse<Product>> {
    service.get_product(&id).await
}

/// Update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateRequest<ProductUpdate>,
    responses(
        (status = 200, description = "Product as stored after the update", body = CollectionResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<UpdateRequest<ProductUpdate>>,
) -> ProductResult<CollectionResponse<Product>> {
    service.update_product(&id, request).await
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = CommandResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<CommandResponse> {
    let result = service.delete_product(&id).await?;
    Ok(result.into())
}
