use crate::{
    commands::Command,
    db::DbPool,
    entities::{product, purchase},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QuerySelect, Set, TransactionError,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use super::StockMovementResult;

/// Receives stock for a product: increments the on-hand quantity and appends
/// a purchase row recording the unit price at execution time. Both effects
/// happen in one transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PurchaseStockCommand {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "Amount must be a positive integer"))]
    pub amount: i32,
    /// Free-form note, carried on the emitted event only
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

#[async_trait::async_trait]
impl Command for PurchaseStockCommand {
    type Result = StockMovementResult;

    #[instrument(skip(self, db_pool, event_sender))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            let msg = format!("Invalid input: {}", e);
            error!("{}", msg);
            ServiceError::ValidationError(msg)
        })?;

        let result = self.purchase_in_db(db_pool.as_ref()).await?;
        self.log_and_trigger_event(&event_sender, &result).await?;
        Ok(result)
    }
}

impl PurchaseStockCommand {
    async fn purchase_in_db(
        &self,
        db: &DatabaseConnection,
    ) -> Result<StockMovementResult, ServiceError> {
        let product_id = self.product_id;
        let amount = self.amount;

        db.transaction::<_, StockMovementResult, ServiceError>(|txn| {
            Box::pin(async move {
                // Locking read: concurrent movements on the same product
                // serialize on the row lock.
                let current = product::Entity::find_by_id(product_id)
                    .lock_exclusive()
                    .one(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!(
                            "Product with ID {} not found",
                            product_id
                        ))
                    })?;

                let previous_quantity = current.quantity;
                let new_quantity = previous_quantity + amount;
                let price = current.price;

                let mut product: product::ActiveModel = current.into();
                product.quantity = Set(new_quantity);
                product.updated_at = Set(Some(Utc::now()));
                product
                    .update(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                let movement = purchase::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    product_id: Set(product_id),
                    quantity: Set(amount),
                    price: Set(price),
                    created_at: Set(Utc::now()),
                };
                let saved = movement
                    .insert(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                Ok(StockMovementResult {
                    movement_id: saved.id,
                    product_id,
                    quantity: amount,
                    price,
                    previous_quantity,
                    new_quantity,
                    occurred_at: saved.created_at,
                })
            })
        })
        .await
        .map_err(|e| {
            error!("Transaction failed for stock purchase: {}", e);
            match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            }
        })
    }

    async fn log_and_trigger_event(
        &self,
        event_sender: &EventSender,
        result: &StockMovementResult,
    ) -> Result<(), ServiceError> {
        info!(
            product_id = %result.product_id,
            amount = %result.quantity,
            new_quantity = %result.new_quantity,
            "Stock purchase recorded"
        );
        event_sender
            .send(Event::StockPurchased {
                movement_id: result.movement_id,
                product_id: result.product_id,
                quantity: result.quantity,
                price: result.price,
                new_quantity: result.new_quantity,
                note: self.note.clone(),
                occurred_at: result.occurred_at,
            })
            .await
            .map_err(|e| {
                let msg = format!("Failed to send event for stock purchase: {}", e);
                error!("{}", msg);
                ServiceError::EventError(msg)
            })
    }
}
