//! HTTP handlers for the Products API

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath,
    errors::responses::{
        BadRequestArgumentResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use tracing::warn;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{ProductDto, ProductInfo, ProductListQuery};
use crate::service::ProductService;
use crate::store::ProductStore;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(ProductDto, ProductInfo),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestArgumentResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Products router; mount it under `/products`.
pub fn router<S: ProductStore + 'static>(service: ProductService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products, optionally filtered by name
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "One page of products", body = Vec<ProductDto>),
        (status = 400, response = BadRequestArgumentResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> ProductResult<Json<Vec<ProductDto>>> {
    let Query(query) = query?;
    let products = service
        .get_products(query.search_term.as_deref(), query.page, query.page_size)
        .await?;

    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductDto>> {
    match service.get_product_by_id(id).await? {
        Some(product) => Ok(Json(product.into())),
        None => {
            warn!(product_id = %id, "Product not found");
            Err(ProductError::NotFound(id))
        }
    }
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductInfo,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    body: Result<Json<Option<ProductInfo>>, JsonRejection>,
) -> ProductResult<impl IntoResponse> {
    let Json(info) = body?;
    let created = service
        .create_product(info.map(|info| info.into_product(Uuid::nil())))
        .await?;

    Ok((StatusCode::CREATED, Json(ProductDto::from(created))))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ProductInfo,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    UuidPath(id): UuidPath,
    body: Result<Json<Option<ProductInfo>>, JsonRejection>,
) -> ProductResult<Json<ProductDto>> {
    let Json(info) = body?;
    let updated = service
        .update_product(info.map(|info| info.into_product(id)))
        .await
        .inspect_err(|e| {
            if matches!(e, ProductError::NotFound(_)) {
                warn!(product_id = %id, "Product not found");
            }
        })?;

    Ok(Json(updated.into()))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    // The service reports an unknown id as out of range; over HTTP it is a 404
    if service.get_product_by_id(id).await?.is_none() {
        warn!(product_id = %id, "Product not found");
        return Err(ProductError::NotFound(id));
    }

    service.delete_product(id).await?;
    Ok(StatusCode::OK)
}
