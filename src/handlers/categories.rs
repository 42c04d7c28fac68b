use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{errors::ApiError, handlers::AppState};
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
pub struct CreateCategoryRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Category name must be between 1 and 100 characters"
    ))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Category name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
    pub description: Option<String>,
}

async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let category = state
        .services
        .categories
        .create_category(payload.name, payload.description)
        .await
        .map_err(map_service_error)?;

    info!("Category created: {}", category.id);

    Ok(created_response(category))
}

async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .services
        .categories
        .get_category(&category_id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Category with ID {} not found", category_id))
        })?;

    Ok(success_response(category))
}

async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state
        .services
        .categories
        .list_categories()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(categories))
}

async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let category = state
        .services
        .categories
        .update_category(category_id, payload.name, payload.description)
        .await
        .map_err(map_service_error)?;

    info!("Category updated: {}", category_id);

    Ok(success_response(category))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .categories
        .delete_category(category_id)
        .await
        .map_err(map_service_error)?;

    info!("Category deleted: {}", category_id);

    Ok(no_content_response())
}

/// Creates the router for category endpoints
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_category).get(list_categories))
        .route(
            "/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
