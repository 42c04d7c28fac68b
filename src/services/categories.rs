use crate::{
    db::DbPool,
    entities::category::{self, Entity as Category, Column as CategoryColumn},
    entities::product,
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionError, TransactionTrait,
};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Service for managing product categories
pub struct CategoryService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl CategoryService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<category::Model, ServiceError> {
        let db = &*self.db_pool;

        let model = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.clone()),
            description: Set(description),
        };

        let created = model.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create category");
            ServiceError::DatabaseError(e)
        })?;

        self.event_sender
            .send(Event::CategoryCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;

        info!(category_id = %created.id, name = %name, "Category created");

        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: &Uuid) -> Result<Option<category::Model>, ServiceError> {
        let db = &*self.db_pool;

        Category::find_by_id(*id).one(db).await.map_err(|e| {
            error!(category_id = %id, error = %e, "Database error when fetching category");
            ServiceError::DatabaseError(e)
        })
    }

    /// List all categories ordered by name
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        let db = &*self.db_pool;

        Category::find()
            .order_by_asc(CategoryColumn::Name)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error when listing categories");
                ServiceError::DatabaseError(e)
            })
    }

    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<category::Model, ServiceError> {
        let db = &*self.db_pool;

        let current = Category::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| {
                error!(category_id = %id, error = %e, "Database error when finding category");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("Category with ID {} not found", id)))?;

        let mut category: category::ActiveModel = current.into();

        if let Some(name) = name {
            category.name = Set(name);
        }

        if let Some(description) = description {
            category.description = Set(Some(description));
        }

        let updated = category.update(db).await.map_err(|e| {
            error!(category_id = %id, error = %e, "Failed to update category");
            ServiceError::DatabaseError(e)
        })?;

        info!(category_id = %updated.id, "Category updated");

        Ok(updated)
    }

    /// Delete a category.
    ///
    /// Products referencing it keep existing: their `category_id` is cleared
    /// in the same transaction that removes the category row.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        db.transaction::<_, (), ServiceError>(|txn| {
            Box::pin(async move {
                let category = Category::find_by_id(id)
                    .one(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Category with ID {} not found", id))
                    })?;

                product::Entity::update_many()
                    .set(product::ActiveModel {
                        category_id: Set(None),
                        ..Default::default()
                    })
                    .filter(product::Column::CategoryId.eq(id))
                    .exec(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                category
                    .delete(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                Ok(())
            })
        })
        .await
        .map_err(|e| {
            error!(category_id = %id, "Transaction failed for category delete: {}", e);
            match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            }
        })?;

        self.event_sender
            .send(Event::CategoryDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        info!(category_id = %id, "Category deleted");

        Ok(())
    }
}
