use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product category.
///
/// Stored in the legacy `INVENTORY_CATEGORY` table; the uppercase column
/// names are kept for compatibility with the pre-existing schema.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[schema(as = Category)]
#[sea_orm(table_name = "INVENTORY_CATEGORY")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key, auto_increment = false, column_name = "ID")]
    pub id: Uuid,

    /// Category name
    #[sea_orm(column_name = "NAME")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Category name must be between 1 and 100 characters"
    ))]
    pub name: String,

    /// Optional free-form description
    #[sea_orm(column_name = "DESCRIPTION")]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
