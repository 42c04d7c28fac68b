use super::common::{
    created_response, default_page, default_per_page, map_service_error, no_content_response,
    success_response, validate_input, PaginatedResponse,
};
use crate::{
    entities::product,
    errors::ApiError,
    handlers::AppState,
    services::products::{CreateProduct, UpdateProduct},
};
use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Request and response DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Product name must be between 1 and 100 characters"
    ))]
    pub name: String,
    /// Raw SKU; stored trimmed and uppercased
    #[validate(length(min = 1, max = 50, message = "SKU must be between 1 and 50 characters"))]
    pub sku: String,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    /// Initial stock, defaults to 0
    pub quantity: Option<i32>,
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Product name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "SKU must be between 1 and 50 characters"))]
    pub sku: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductListParams {
    /// Case-insensitive substring matched against name or SKU
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

// Handler functions

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = product::Model),
        (status = 400, description = "Invalid input or duplicate SKU", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let product = state
        .services
        .products
        .create_product(CreateProduct {
            name: payload.name,
            sku: payload.sku,
            category_id: payload.category_id,
            supplier_id: payload.supplier_id,
            quantity: payload.quantity,
            price: payload.price,
        })
        .await
        .map_err(map_service_error)?;

    info!("Product created: {}", product.id);

    Ok(created_response(product))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = product::Model),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .services
        .products
        .get_product(&product_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound(format!("Product with ID {} not found", product_id)))?;

    Ok(success_response(product))
}

/// List products ordered by name, optionally filtered by `q`
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Products retrieved", body = PaginatedResponse<product::Model>),
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (products, total) = state
        .services
        .products
        .search_products(params.q, params.page, params.per_page)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(PaginatedResponse::new(
        products,
        params.page,
        params.per_page,
        total,
    )))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let product = state
        .services
        .products
        .update_product(
            product_id,
            UpdateProduct {
                name: payload.name,
                sku: payload.sku,
                category_id: payload.category_id,
                supplier_id: payload.supplier_id,
                quantity: payload.quantity,
                price: payload.price,
            },
        )
        .await
        .map_err(map_service_error)?;

    info!("Product updated: {}", product_id);

    Ok(success_response(product))
}

/// Delete a product and its movement history
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .products
        .delete_product(product_id)
        .await
        .map_err(map_service_error)?;

    info!("Product deleted: {}", product_id);

    Ok(no_content_response())
}

/// Creates the router for product endpoints
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/purchase", post(super::stock::purchase_stock))
        .route("/:id/sale", post(super::stock::sell_stock))
}
