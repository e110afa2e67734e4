//! Product catalog CRUD.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{NewProduct, Product};
use crate::store::ProductStore;

pub struct ProductService {
    store: Arc<dyn ProductStore>,
    events: EventSender,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, events: EventSender) -> Self {
        Self { store, events }
    }

    pub async fn create(&self, new: NewProduct) -> Result<Product, ServiceError> {
        let product = Product::from_new(new);
        self.store.insert(product.clone()).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "product created");
        self.events.emit(Event::ProductCreated(product.id));
        Ok(product)
    }

    pub async fn get(&self, id: Uuid) -> Result<Product, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn update(&self, id: Uuid, new: NewProduct) -> Result<Product, ServiceError> {
        let mut product = self.get(id).await?;
        product.name = new.name;
        product.price = new.price;
        product.category = new.category;
        product.stock = new.stock;
        product.updated_at = Utc::now();

        self.store.update(product.clone()).await?;
        self.events.emit(Event::ProductUpdated(id));
        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(format!("Product {} not found", id)));
        }
        self.events.emit(Event::ProductDeleted(id));
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.store.list().await
    }

    pub async fn create_many(&self, new: Vec<NewProduct>) -> Result<Vec<Product>, ServiceError> {
        let products: Vec<Product> = new.into_iter().map(Product::from_new).collect();
        let count = self.store.insert_many(products.clone()).await?;
        tracing::info!(count, "products imported");
        self.events.emit(Event::ProductsImported(count));
        Ok(products)
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<usize, ServiceError> {
        let removed = self.store.delete_many(ids).await?;
        tracing::info!(requested = ids.len(), removed, "products bulk-deleted");
        Ok(removed)
    }
}
