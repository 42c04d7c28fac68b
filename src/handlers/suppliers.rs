use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::suppliers::{CreateSupplier, UpdateSupplier},
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupplierRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Supplier name must be between 1 and 150 characters"
    ))]
    pub name: String,
    #[validate(length(max = 100, message = "Contact person cannot exceed 100 characters"))]
    pub contact_person: Option<String>,
    #[validate(length(max = 20, message = "Phone cannot exceed 20 characters"))]
    pub phone: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSupplierRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Supplier name must be between 1 and 150 characters"
    ))]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "Contact person cannot exceed 100 characters"))]
    pub contact_person: Option<String>,
    #[validate(length(max = 20, message = "Phone cannot exceed 20 characters"))]
    pub phone: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    pub address: Option<String>,
}

async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let supplier = state
        .services
        .suppliers
        .create_supplier(CreateSupplier {
            name: payload.name,
            contact_person: payload.contact_person,
            phone: payload.phone,
            email: payload.email,
            address: payload.address,
        })
        .await
        .map_err(map_service_error)?;

    info!("Supplier created: {}", supplier.id);

    Ok(created_response(supplier))
}

async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier = state
        .services
        .suppliers
        .get_supplier(&supplier_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Supplier with ID {} not found", supplier_id))
        })?;

    Ok(success_response(supplier))
}

async fn list_suppliers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let suppliers = state
        .services
        .suppliers
        .list_suppliers()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(suppliers))
}

async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let supplier = state
        .services
        .suppliers
        .update_supplier(
            supplier_id,
            UpdateSupplier {
                name: payload.name,
                contact_person: payload.contact_person,
                phone: payload.phone,
                email: payload.email,
                address: payload.address,
            },
        )
        .await
        .map_err(map_service_error)?;

    info!("Supplier updated: {}", supplier_id);

    Ok(success_response(supplier))
}

async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .suppliers
        .delete_supplier(supplier_id)
        .await
        .map_err(map_service_error)?;

    info!("Supplier deleted: {}", supplier_id);

    Ok(no_content_response())
}

/// Creates the router for supplier endpoints
pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_supplier).get(list_suppliers))
        .route(
            "/:id",
            get(get_supplier)
                .put(update_supplier)
                .delete(delete_supplier),
        )
}
