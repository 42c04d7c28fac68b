use crate::{
    db::DbPool,
    entities::product::{self, Entity as Product, Column as ProductColumn},
    errors::ServiceError,
};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, instrument};
use utoipa::ToSchema;

/// A product is considered low on stock at or below this many units.
pub const LOW_STOCK_THRESHOLD: i32 = 5;

/// Aggregate metrics shown on the dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardMetrics {
    /// Number of products
    pub total_products: u64,
    /// Sum of on-hand quantities across all products
    pub total_units: i64,
    /// Sum of quantity x unit price across all products
    pub inventory_value: Decimal,
    /// Products at or below the low-stock threshold, ordered by name
    pub low_stock: Vec<product::Model>,
}

/// Service computing dashboard aggregates
pub struct ReportService {
    db_pool: Arc<DbPool>,
}

impl ReportService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Compute the dashboard metrics. All aggregates are evaluated in the
    /// database; empty tables yield zeros.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardMetrics, ServiceError> {
        let db = &*self.db_pool;

        let total_products = Product::find().count(db).await.map_err(|e| {
            error!(error = %e, "Database error when counting products");
            ServiceError::DatabaseError(e)
        })?;

        let totals: Option<(Option<i64>, Option<Decimal>)> = Product::find()
            .select_only()
            .column_as(Expr::col(ProductColumn::Quantity).sum(), "total_units")
            .column_as(
                Expr::expr(Expr::col(ProductColumn::Quantity).mul(Expr::col(ProductColumn::Price)))
                    .sum(),
                "inventory_value",
            )
            .into_tuple()
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error when aggregating inventory totals");
                ServiceError::DatabaseError(e)
            })?;

        let (total_units, inventory_value) = totals.unwrap_or((None, None));

        let low_stock = Product::find()
            .filter(ProductColumn::Quantity.lte(LOW_STOCK_THRESHOLD))
            .order_by_asc(ProductColumn::Name)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error when fetching low-stock products");
                ServiceError::DatabaseError(e)
            })?;

        Ok(DashboardMetrics {
            total_products,
            total_units: total_units.unwrap_or(0),
            inventory_value: inventory_value.unwrap_or(Decimal::ZERO),
            low_stock,
        })
    }
}
