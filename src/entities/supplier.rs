use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Supplier entity.
///
/// Stored in the legacy `INVENTORY_SUPPLIER` table (uppercase column names).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate, ToSchema)]
#[schema(as = Supplier)]
#[sea_orm(table_name = "INVENTORY_SUPPLIER")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key, auto_increment = false, column_name = "ID")]
    pub id: Uuid,

    /// Supplier name
    #[sea_orm(column_name = "NAME")]
    #[validate(length(
        min = 1,
        max = 150,
        message = "Supplier name must be between 1 and 150 characters"
    ))]
    pub name: String,

    /// Contact person
    #[sea_orm(column_name = "CONTACT_PERSON")]
    #[validate(length(max = 100, message = "Contact person cannot exceed 100 characters"))]
    pub contact_person: Option<String>,

    /// Phone number
    #[sea_orm(column_name = "PHONE")]
    #[validate(length(max = 20, message = "Phone cannot exceed 20 characters"))]
    pub phone: Option<String>,

    /// Contact email
    #[sea_orm(column_name = "EMAIL")]
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,

    /// Postal address
    #[sea_orm(column_name = "ADDRESS")]
    pub address: Option<String>,
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
