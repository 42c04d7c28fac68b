//! Stockroom API: a small inventory-tracking service.
//!
//! Products, suppliers and categories are plain CRUD resources; stock enters
//! and leaves through the two transactional movement commands (purchase and
//! sale), which append to an immutable movement ledger. The dashboard exposes
//! aggregate metrics over the catalog.

pub mod commands;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// All `/api/v1` routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .nest("/products", handlers::products::product_routes())
        .nest("/categories", handlers::categories::category_routes())
        .nest("/suppliers", handlers::suppliers::supplier_routes())
        .route("/purchases", get(handlers::stock::list_purchases))
        .route("/sales", get(handlers::stock::list_sales))
}
