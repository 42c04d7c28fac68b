use crate::{
    db::DbPool,
    entities::product::{self, Entity as Product, Column as ProductColumn},
    entities::{purchase, sale},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionError, TransactionTrait,
};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Fields accepted when creating a product
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub sku: String,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub price: Decimal,
}

/// Fields accepted when updating a product; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
}

/// Service for managing products
pub struct ProductService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ProductService {
    /// Creates a new product service instance
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Create a new product.
    ///
    /// The SKU is normalized (trimmed, uppercased) and the quantity clamped
    /// to zero before anything touches the database; duplicate normalized
    /// SKUs are rejected.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> Result<product::Model, ServiceError> {
        let db = &*self.db_pool;

        let sku = product::normalize_sku(&input.sku);
        if sku.is_empty() {
            return Err(ServiceError::ValidationError(
                "SKU must not be empty".to_string(),
            ));
        }
        let quantity = product::clamp_quantity(input.quantity.unwrap_or(0));

        let existing = Product::find()
            .filter(ProductColumn::Sku.eq(&sku))
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error when checking for existing SKU");
                ServiceError::DatabaseError(e)
            })?;

        if existing.is_some() {
            let msg = format!("Product with SKU '{}' already exists", sku);
            error!(%msg);
            return Err(ServiceError::ValidationError(msg));
        }

        let model = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            sku: Set(sku.clone()),
            category_id: Set(input.category_id),
            supplier_id: Set(input.supplier_id),
            quantity: Set(quantity),
            price: Set(input.price),
            created_at: Set(Utc::now()),
            updated_at: Set(Some(Utc::now())),
        };

        let created = model.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create product");
            ServiceError::DatabaseError(e)
        })?;

        self.event_sender
            .send(Event::ProductCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;

        info!(product_id = %created.id, name = %input.name, sku = %sku, "Product created");

        Ok(created)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &Uuid) -> Result<Option<product::Model>, ServiceError> {
        let db = &*self.db_pool;

        Product::find_by_id(*id)
            .one(db)
            .await
            .map_err(|e| {
                error!(product_id = %id, error = %e, "Database error when fetching product");
                ServiceError::DatabaseError(e)
            })
    }

    /// Get a product by SKU; the lookup normalizes its input, so any raw
    /// spelling of the same SKU resolves to the same product
    #[instrument(skip(self))]
    pub async fn get_product_by_sku(&self, sku: &str) -> Result<Option<product::Model>, ServiceError> {
        let db = &*self.db_pool;

        Product::find()
            .filter(ProductColumn::Sku.eq(product::normalize_sku(sku)))
            .one(db)
            .await
            .map_err(|e| {
                error!(sku = %sku, error = %e, "Database error when fetching product by SKU");
                ServiceError::DatabaseError(e)
            })
    }

    /// List products ordered by name, optionally filtered by a
    /// case-insensitive substring match against name or SKU.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        search_term: Option<String>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<product::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = Product::find();

        if let Some(term) = search_term.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", term.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(ProductColumn::Name))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(ProductColumn::Sku))).like(pattern)),
            );
        }

        let paginator = query
            .order_by_asc(ProductColumn::Name)
            .paginate(db, per_page);

        let total = paginator.num_items().await.map_err(|e| {
            error!(error = %e, "Database error when counting products");
            ServiceError::DatabaseError(e)
        })?;

        let products = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| {
                error!(page = %page, error = %e, "Database error when fetching products");
                ServiceError::DatabaseError(e)
            })?;

        Ok((products, total))
    }

    /// Update a product. Provided fields overwrite, absent fields stay; the
    /// same normalization and duplicate-SKU rules as creation apply.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> Result<product::Model, ServiceError> {
        let db = &*self.db_pool;

        let current = Product::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| {
                error!(product_id = %id, error = %e, "Database error when finding product");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with ID {} not found", id)))?;

        let mut product: product::ActiveModel = current.into();

        if let Some(name) = input.name {
            product.name = Set(name);
        }

        if let Some(sku) = input.sku {
            let sku = product::normalize_sku(&sku);
            if sku.is_empty() {
                return Err(ServiceError::ValidationError(
                    "SKU must not be empty".to_string(),
                ));
            }

            let duplicate = Product::find()
                .filter(ProductColumn::Sku.eq(&sku))
                .filter(ProductColumn::Id.ne(id))
                .one(db)
                .await
                .map_err(|e| {
                    error!(error = %e, "Database error when checking for existing SKU");
                    ServiceError::DatabaseError(e)
                })?;

            if duplicate.is_some() {
                let msg = format!("Product with SKU '{}' already exists", sku);
                error!(%msg);
                return Err(ServiceError::ValidationError(msg));
            }

            product.sku = Set(sku);
        }

        if let Some(category_id) = input.category_id {
            product.category_id = Set(Some(category_id));
        }

        if let Some(supplier_id) = input.supplier_id {
            product.supplier_id = Set(Some(supplier_id));
        }

        if let Some(quantity) = input.quantity {
            product.quantity = Set(product::clamp_quantity(quantity));
        }

        if let Some(price) = input.price {
            product.price = Set(price);
        }

        product.updated_at = Set(Some(Utc::now()));

        let updated = product.update(db).await.map_err(|e| {
            error!(product_id = %id, error = %e, "Failed to update product");
            ServiceError::DatabaseError(e)
        })?;

        self.event_sender
            .send(Event::ProductUpdated(updated.id))
            .await
            .map_err(ServiceError::EventError)?;

        info!(product_id = %updated.id, "Product updated");

        Ok(updated)
    }

    /// Delete a product together with its movement history.
    ///
    /// The purchase/sale rows and the product row go in one transaction, so
    /// no orphaned ledger entries can be observed.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        db.transaction::<_, (), ServiceError>(|txn| {
            Box::pin(async move {
                let product = Product::find_by_id(id)
                    .one(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Product with ID {} not found", id))
                    })?;

                purchase::Entity::delete_many()
                    .filter(purchase::Column::ProductId.eq(id))
                    .exec(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                sale::Entity::delete_many()
                    .filter(sale::Column::ProductId.eq(id))
                    .exec(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                product
                    .delete(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;

                Ok(())
            })
        })
        .await
        .map_err(|e| {
            error!(product_id = %id, "Transaction failed for product delete: {}", e);
            match e {
                TransactionError::Connection(db_err) => ServiceError::DatabaseError(db_err),
                TransactionError::Transaction(service_err) => service_err,
            }
        })?;

        self.event_sender
            .send(Event::ProductDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        info!(product_id = %id, "Product deleted");

        Ok(())
    }
}
