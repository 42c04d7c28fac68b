use crate::{
    commands::stock::{PurchaseStockCommand, SellStockCommand, StockMovementResult},
    commands::Command,
    db::DbPool,
    entities::{purchase, sale},
    errors::ServiceError,
    events::EventSender,
};
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder};
use std::sync::Arc;
use tracing::{error, instrument};
use uuid::Uuid;

/// Service for recording and listing stock movements
pub struct StockService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl StockService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Receive stock for a product
    #[instrument(skip(self))]
    pub async fn purchase(
        &self,
        product_id: Uuid,
        amount: i32,
        note: Option<String>,
    ) -> Result<StockMovementResult, ServiceError> {
        PurchaseStockCommand {
            product_id,
            amount,
            note,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await
    }

    /// Sell stock for a product
    #[instrument(skip(self))]
    pub async fn sell(
        &self,
        product_id: Uuid,
        amount: i32,
        note: Option<String>,
    ) -> Result<StockMovementResult, ServiceError> {
        SellStockCommand {
            product_id,
            amount,
            note,
        }
        .execute(self.db_pool.clone(), self.event_sender.clone())
        .await
    }

    /// List purchase movements, newest first
    #[instrument(skip(self))]
    pub async fn list_purchases(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<purchase::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let paginator = purchase::Entity::find()
            .order_by_desc(purchase::Column::CreatedAt)
            .paginate(db, per_page);

        let total = paginator.num_items().await.map_err(|e| {
            error!(error = %e, "Database error when counting purchases");
            ServiceError::DatabaseError(e)
        })?;

        let purchases = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| {
                error!(page = %page, error = %e, "Database error when fetching purchases");
                ServiceError::DatabaseError(e)
            })?;

        Ok((purchases, total))
    }

    /// List sale movements, newest first
    #[instrument(skip(self))]
    pub async fn list_sales(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<sale::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let paginator = sale::Entity::find()
            .order_by_desc(sale::Column::CreatedAt)
            .paginate(db, per_page);

        let total = paginator.num_items().await.map_err(|e| {
            error!(error = %e, "Database error when counting sales");
            ServiceError::DatabaseError(e)
        })?;

        let sales = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| {
                error!(page = %page, error = %e, "Database error when fetching sales");
                ServiceError::DatabaseError(e)
            })?;

        Ok((sales, total))
    }
}
