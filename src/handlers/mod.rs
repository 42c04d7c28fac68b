pub mod categories;
pub mod common;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod stock;
pub mod suppliers;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::{
    categories::CategoryService, products::ProductService, reports::ReportService,
    stock::StockService, suppliers::SupplierService,
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductService>,
    pub categories: Arc<CategoryService>,
    pub suppliers: Arc<SupplierService>,
    pub stock: Arc<StockService>,
    pub reports: Arc<ReportService>,
}

impl AppServices {
    /// Build the services container shared by all handlers
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            products: Arc::new(ProductService::new(db_pool.clone(), event_sender.clone())),
            categories: Arc::new(CategoryService::new(db_pool.clone(), event_sender.clone())),
            suppliers: Arc::new(SupplierService::new(db_pool.clone(), event_sender.clone())),
            stock: Arc::new(StockService::new(db_pool.clone(), event_sender)),
            reports: Arc::new(ReportService::new(db_pool)),
        }
    }
}
