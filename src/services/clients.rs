//! Client CRUD on top of the persistence port.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{Client, NewClient};
use crate::store::ClientStore;

pub struct ClientService {
    store: Arc<dyn ClientStore>,
    events: EventSender,
}

impl ClientService {
    pub fn new(store: Arc<dyn ClientStore>, events: EventSender) -> Self {
        Self { store, events }
    }

    pub async fn create(&self, new: NewClient) -> Result<Client, ServiceError> {
        let client = Client::from_new(new);
        self.store.insert(client.clone()).await?;
        tracing::info!(client_id = %client.id, name = %client.name, "client created");
        self.events.emit(Event::ClientCreated(client.id));
        Ok(client)
    }

    pub async fn get(&self, id: Uuid) -> Result<Client, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Client {} not found", id)))
    }

    /// Full replacement of the editable fields; `created_at` is preserved and
    /// `updated_at` bumped.
    pub async fn update(&self, id: Uuid, new: NewClient) -> Result<Client, ServiceError> {
        let mut client = self.get(id).await?;
        client.name = new.name;
        client.email = new.email;
        client.phone = new.phone;
        client.address = new.address;
        client.updated_at = Utc::now();

        self.store.update(client.clone()).await?;
        self.events.emit(Event::ClientUpdated(id));
        Ok(client)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(format!("Client {} not found", id)));
        }
        self.events.emit(Event::ClientDeleted(id));
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Client>, ServiceError> {
        self.store.list().await
    }

    /// Bulk import, used by spreadsheet-migration tooling. Each record is
    /// created independently; there is no all-or-nothing guarantee.
    pub async fn create_many(&self, new: Vec<NewClient>) -> Result<Vec<Client>, ServiceError> {
        let clients: Vec<Client> = new.into_iter().map(Client::from_new).collect();
        let count = self.store.insert_many(clients.clone()).await?;
        tracing::info!(count, "clients imported");
        self.events.emit(Event::ClientsImported(count));
        Ok(clients)
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<usize, ServiceError> {
        let removed = self.store.delete_many(ids).await?;
        tracing::info!(requested = ids.len(), removed, "clients bulk-deleted");
        Ok(removed)
    }
}
