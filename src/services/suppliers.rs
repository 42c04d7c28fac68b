use crate::{
    db::DbPool,
    entities::product,
    entities::supplier::{self, Entity as Supplier, Column as SupplierColumn},
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

/// Fields accepted when creating a supplier
#[derive(Debug, Clone)]
pub struct CreateSupplier {
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Fields accepted when updating a supplier; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateSupplier {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Service for managing suppliers
pub struct SupplierService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl SupplierService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_supplier(
        &self,
        input: CreateSupplier,
    ) -> Result<supplier::Model, ServiceError> {
        let db = &*self.db_pool;

        let model = supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            contact_person: Set(input.contact_person),
            phone: Set(input.phone),
            email: Set(input.email),
            address: Set(input.address),
        };

        let created = model.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create supplier");
            ServiceError::DatabaseError(e)
        })?;

        self.event_sender
            .send(Event::SupplierCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;

        info!(supplier_id = %created.id, name = %input.name, "Supplier created");

        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_supplier(&self, id: &Uuid) -> Result<Option<supplier::Model>, ServiceError> {
        let db = &*self.db_pool;

        Supplier::find_by_id(*id).one(db).await.map_err(|e| {
            error!(supplier_id = %id, error = %e, "Database error when fetching supplier");
            ServiceError::DatabaseError(e)
        })
    }

    /// List all suppliers ordered by name
    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        let db = &*self.db_pool;

        Supplier::find()
            .order_by_asc(SupplierColumn::Name)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error when listing suppliers");
                ServiceError::DatabaseError(e)
            })
    }

    #[instrument(skip(self, input))]
    pub async fn update_supplier(
        &self,
        id: Uuid,
        input: UpdateSupplier,
    ) -> Result<supplier::Model, ServiceError> {
        let db = &*self.db_pool;

        let current = Supplier::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| {
                error!(supplier_id = %id, error = %e, "Database error when finding supplier");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier with ID {} not found", id)))?;

        let mut supplier: supplier::ActiveModel = current.into();

        if let Some(name) = input.name {
            supplier.name = Set(name);
        }

        if let Some(contact_person) = input.contact_person {
            supplier.contact_person = Set(Some(contact_person));
        }

        if let Some(phone) = input.phone {
            supplier.phone = Set(Some(phone));
        }

        if let Some(email) = input.email {
            supplier.email = Set(Some(email));
        }

        if let Some(address) = input.address {
            supplier.address = Set(Some(address));
        }

        let updated = supplier.update(db).await.map_err(|e| {
            error!(supplier_id = %id, error = %e, "Failed to update supplier");
            ServiceError::DatabaseError(e)
        })?;

        info!(supplier_id = %updated.id, "Supplier updated");

        Ok(updated)
    }

    /// Delete a supplier, clearing `supplier_id` on referencing products in
    /// the same transaction.
    #[instrument(skip(self))]
    pub async fn delete_supplier(&self, id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        db.transaction::<_, (), ServiceError>(|txn| {
            Box::pin(async move {
                let supplier = Supplier::find_by_id(id)
                    .one(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Supplier with ID {} not found", id))
                    })?;

                product::Entity::update_many()
                    .set(product::ActiveModel {
                        supplier_id: Set(None),
                        ..Default::default()
                    })
                    .filter(product::Column::SupplierId.eq(id))
                    .exec(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                supplier
                    .delete(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                Ok(())
            })
        })
        .await
        .map_err(|e| {
            error!(supplier_id = %id, "Transaction failed for supplier delete: {}", e);
            match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            }
        })?;

        self.event_sender
            .send(Event::SupplierDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        info!(supplier_id = %id, "Supplier deleted");

        Ok(())
    }
}
