use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod purchase_stock_command;
pub mod sell_stock_command;

pub use purchase_stock_command::PurchaseStockCommand;
pub use sell_stock_command::SellStockCommand;

/// Outcome of a stock movement, returned to the caller and echoed on the
/// emitted domain event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockMovementResult {
    pub movement_id: Uuid,
    pub product_id: Uuid,
    /// Units moved
    pub quantity: i32,
    /// Unit price recorded at execution time
    pub price: Decimal,
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub occurred_at: DateTime<Utc>,
}
