use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// Domain events emitted by the services after a successful write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Product lifecycle
    ProductCreated(Uuid),
    ProductUpdated(Uuid),
    ProductDeleted(Uuid),

    // Reference data lifecycle
    CategoryCreated(Uuid),
    CategoryDeleted(Uuid),
    SupplierCreated(Uuid),
    SupplierDeleted(Uuid),

    // Stock movements
    StockPurchased {
        movement_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        price: Decimal,
        new_quantity: i32,
        note: Option<String>,
        occurred_at: DateTime<Utc>,
    },
    StockSold {
        movement_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        price: Decimal,
        new_quantity: i32,
        note: Option<String>,
        occurred_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Background loop draining the event channel.
///
/// Events currently only feed structured logs; the channel boundary keeps
/// write paths decoupled from whatever consumes the events later.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    info!("Event processor started");
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::StockPurchased {
                product_id,
                quantity,
                new_quantity,
                ..
            } => {
                info!(
                    product_id = %product_id,
                    quantity = %quantity,
                    new_quantity = %new_quantity,
                    "Stock purchased"
                );
            }
            Event::StockSold {
                product_id,
                quantity,
                new_quantity,
                ..
            } => {
                info!(
                    product_id = %product_id,
                    quantity = %quantity,
                    new_quantity = %new_quantity,
                    "Stock sold"
                );
            }
            other => debug!(event = ?other, "Domain event"),
        }
    }
    info!("Event processor stopped");
}
