use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "0.1.0",
        description = r#"
# Stockroom Inventory API

A small inventory-tracking service: products, suppliers, categories and an
append-only ledger of purchase/sale stock movements.

## Stock movements

A purchase increases a product's on-hand quantity; a sale decreases it and is
rejected with `422 Unprocessable Entity` when the requested amount exceeds
the available stock. Each movement records the unit price at execution time.

## Pagination

List endpoints accept `page` (default 1) and `per_page` (default 20) query
parameters and wrap results with pagination metadata.
        "#
    ),
    paths(
        crate::handlers::products::create_product,
        crate::handlers::products::get_product,
        crate::handlers::products::list_products,
        crate::handlers::stock::purchase_stock,
        crate::handlers::stock::sell_stock,
        crate::handlers::dashboard::get_dashboard,
    ),
    components(schemas(
        crate::entities::product::Model,
        crate::entities::category::Model,
        crate::entities::supplier::Model,
        crate::entities::purchase::Model,
        crate::entities::sale::Model,
        crate::commands::stock::StockMovementResult,
        crate::services::reports::DashboardMetrics,
        crate::errors::ErrorResponse,
    )),
    tags(
        (name = "products", description = "Product catalog"),
        (name = "stock", description = "Stock movements"),
        (name = "dashboard", description = "Aggregate metrics")
    )
)]
pub struct ApiDoc;

/// Swagger UI serving the OpenAPI document
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
