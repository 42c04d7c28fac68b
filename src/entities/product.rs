use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[schema(as = Product)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Product name
    #[validate(length(
        min = 1,
        max = 100,
        message = "Product name must be between 1 and 100 characters"
    ))]
    pub name: String,

    /// SKU (Stock Keeping Unit), unique across all products.
    /// Always stored normalized: trimmed and uppercased.
    #[validate(length(
        min = 1,
        max = 50,
        message = "SKU must be between 1 and 50 characters"
    ))]
    pub sku: String,

    /// Category reference, cleared when the category is deleted
    pub category_id: Option<Uuid>,

    /// Supplier reference, cleared when the supplier is deleted
    pub supplier_id: Option<Uuid>,

    /// Units on hand, never negative
    pub quantity: i32,

    /// Unit price
    pub price: Decimal,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Supplier,
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
    #[sea_orm(has_many = "super::sale::Entity")]
    Sales,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Normalizes a SKU for storage and lookup: trimmed, uppercased.
///
/// Every product write path calls this before touching the database, so the
/// uniqueness constraint always operates on the normalized form.
pub fn normalize_sku(sku: &str) -> String {
    sku.trim().to_uppercase()
}

/// Clamps a quantity to the valid range. Quantities below zero are stored
/// as zero.
pub fn clamp_quantity(quantity: i32) -> i32 {
    quantity.max(0)
}
