use super::common::{
    created_response, map_service_error, success_response, validate_input, PaginatedResponse,
    PaginationParams,
};
use crate::{
    commands::stock::StockMovementResult,
    entities::{purchase, sale},
    errors::ApiError,
    handlers::AppState,
};
use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Form body shared by the purchase and sale endpoints
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StockMovementRequest {
    /// Units to move, at least 1
    #[validate(range(min = 1, message = "Amount must be a positive integer"))]
    pub amount: i32,
    /// Free-form note, carried on the emitted event only
    #[validate(length(max = 500, message = "Note cannot exceed 500 characters"))]
    pub note: Option<String>,
}

/// Receive stock for a product
#[utoipa::path(
    post,
    path = "/api/v1/products/{id}/purchase",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = StockMovementRequest,
    responses(
        (status = 201, description = "Stock increased", body = StockMovementResult),
        (status = 400, description = "Invalid amount", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    )
)]
pub async fn purchase_stock(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<StockMovementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let result = state
        .services
        .stock
        .purchase(product_id, payload.amount, payload.note)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(result))
}

/// Sell stock for a product
#[utoipa::path(
    post,
    path = "/api/v1/products/{id}/sale",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = StockMovementRequest,
    responses(
        (status = 201, description = "Stock decreased", body = StockMovementResult),
        (status = 400, description = "Invalid amount", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse),
    )
)]
pub async fn sell_stock(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<StockMovementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let result = state
        .services
        .stock
        .sell(product_id, payload.amount, payload.note)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(result))
}

/// List purchase movements, newest first
pub async fn list_purchases(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (purchases, total) = state
        .services
        .stock
        .list_purchases(pagination.page, pagination.per_page)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(PaginatedResponse::<purchase::Model>::new(
        purchases,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// List sale movements, newest first
pub async fn list_sales(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (sales, total) = state
        .services
        .stock
        .list_sales(pagination.page, pagination.per_page)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(PaginatedResponse::<sale::Model>::new(
        sales,
        pagination.page,
        pagination.per_page,
        total,
    )))
}
