//! Persistence port.
//!
//! The real deployment delegates storage to an external managed backend that
//! offers flat-record create/read/update/delete plus bulk operations, with no
//! multi-record transaction guarantees. These traits mirror that contract;
//! the in-memory implementation backs tests and standalone runs.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::{Client, Product, Proposal};

/// One-shot mutation applied to a proposal under the store's entry guard, so
/// a read-modify-recompute is a single atomic step per proposal.
pub type ProposalMutation = Box<dyn FnOnce(&mut Proposal) -> Result<(), ServiceError> + Send>;

#[async_trait]
pub trait ProposalStore: Send + Sync {
    async fn insert(&self, proposal: Proposal) -> Result<(), ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Proposal>, ServiceError>;
    async fn find_by_number(&self, number: &str) -> Result<Option<Proposal>, ServiceError>;
    /// Apply `op` to the stored proposal and return the updated record.
    async fn mutate(&self, id: Uuid, op: ProposalMutation) -> Result<Proposal, ServiceError>;
    /// Remove a proposal and, with it, every item it owns. Returns whether
    /// anything was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    /// All proposals in insertion order.
    async fn list(&self) -> Result<Vec<Proposal>, ServiceError>;
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn insert(&self, client: Client) -> Result<(), ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Client>, ServiceError>;
    async fn update(&self, client: Client) -> Result<(), ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    /// All clients ordered by name, as the backing store listed them.
    async fn list(&self) -> Result<Vec<Client>, ServiceError>;
    async fn insert_many(&self, clients: Vec<Client>) -> Result<usize, ServiceError>;
    async fn delete_many(&self, ids: &[Uuid]) -> Result<usize, ServiceError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: Product) -> Result<(), ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Product>, ServiceError>;
    async fn update(&self, product: Product) -> Result<(), ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    /// All products ordered by name.
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    async fn insert_many(&self, products: Vec<Product>) -> Result<usize, ServiceError>;
    async fn delete_many(&self, ids: &[Uuid]) -> Result<usize, ServiceError>;
}

/// DashMap-backed store. Proposal entries carry an insertion sequence so
/// listing preserves creation order.
#[derive(Default)]
pub struct InMemoryStore {
    proposals: DashMap<Uuid, (u64, Proposal)>,
    proposal_seq: AtomicU64,
    clients: DashMap<Uuid, Client>,
    products: DashMap<Uuid, Product>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProposalStore for InMemoryStore {
    async fn insert(&self, proposal: Proposal) -> Result<(), ServiceError> {
        let seq = self.proposal_seq.fetch_add(1, Ordering::Relaxed);
        self.proposals.insert(proposal.id, (seq, proposal));
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Proposal>, ServiceError> {
        Ok(self.proposals.get(&id).map(|entry| entry.1.clone()))
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Proposal>, ServiceError> {
        Ok(self
            .proposals
            .iter()
            .find(|entry| entry.1.number == number)
            .map(|entry| entry.1.clone()))
    }

    async fn mutate(&self, id: Uuid, op: ProposalMutation) -> Result<Proposal, ServiceError> {
        let mut entry = self
            .proposals
            .get_mut(&id)
            .ok_or_else(|| ServiceError::NotFound(format!("Proposal {} not found", id)))?;
        op(&mut entry.1)?;
        Ok(entry.1.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.proposals.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Proposal>, ServiceError> {
        let mut entries: Vec<(u64, Proposal)> = self
            .proposals
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, proposal)| proposal).collect())
    }
}

#[async_trait]
impl ClientStore for InMemoryStore {
    async fn insert(&self, client: Client) -> Result<(), ServiceError> {
        self.clients.insert(client.id, client);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Client>, ServiceError> {
        Ok(self.clients.get(&id).map(|c| c.clone()))
    }

    async fn update(&self, client: Client) -> Result<(), ServiceError> {
        match self.clients.get_mut(&client.id) {
            Some(mut entry) => {
                *entry = client;
                Ok(())
            }
            None => Err(ServiceError::NotFound(format!(
                "Client {} not found",
                client.id
            ))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.clients.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Client>, ServiceError> {
        let mut clients: Vec<Client> = self.clients.iter().map(|c| c.clone()).collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    async fn insert_many(&self, clients: Vec<Client>) -> Result<usize, ServiceError> {
        let count = clients.len();
        for client in clients {
            self.clients.insert(client.id, client);
        }
        Ok(count)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<usize, ServiceError> {
        Ok(ids
            .iter()
            .filter(|id| self.clients.remove(id).is_some())
            .count())
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn insert(&self, product: Product) -> Result<(), ServiceError> {
        self.products.insert(product.id, product);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, ServiceError> {
        Ok(self.products.get(&id).map(|p| p.clone()))
    }

    async fn update(&self, product: Product) -> Result<(), ServiceError> {
        match self.products.get_mut(&product.id) {
            Some(mut entry) => {
                *entry = product;
                Ok(())
            }
            None => Err(ServiceError::NotFound(format!(
                "Product {} not found",
                product.id
            ))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.products.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let mut products: Vec<Product> = self.products.iter().map(|p| p.clone()).collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn insert_many(&self, products: Vec<Product>) -> Result<usize, ServiceError> {
        let count = products.len();
        for product in products {
            self.products.insert(product.id, product);
        }
        Ok(count)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<usize, ServiceError> {
        Ok(ids
            .iter()
            .filter(|id| self.products.remove(id).is_some())
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewClient;

    #[tokio::test]
    async fn proposal_list_preserves_insertion_order() {
        let store = InMemoryStore::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            let proposal = Proposal::new(format!("PROP-2025-000{}", i));
            ids.push(proposal.id);
            ProposalStore::insert(&store, proposal).await.unwrap();
        }

        let listed = ProposalStore::list(&store).await.unwrap();
        let listed_ids: Vec<Uuid> = listed.iter().map(|p| p.id).collect();
        assert_eq!(listed_ids, ids);
    }

    #[tokio::test]
    async fn mutate_rejects_unknown_ids() {
        let store = InMemoryStore::new();
        let result = store
            .mutate(Uuid::new_v4(), Box::new(|_p| Ok(())))
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn clients_list_sorted_by_name() {
        let store = InMemoryStore::new();
        for name in ["Zeta Ltda", "Alfa SA", "Mid Corp"] {
            let client = Client::from_new(NewClient {
                name: name.to_string(),
                email: String::new(),
                phone: String::new(),
                address: String::new(),
            });
            ClientStore::insert(&store, client).await.unwrap();
        }

        let names: Vec<String> = ClientStore::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Alfa SA", "Mid Corp", "Zeta Ltda"]);
    }

    #[tokio::test]
    async fn bulk_delete_reports_how_many_existed() {
        let store = InMemoryStore::new();
        let client = Client::from_new(NewClient {
            name: "Solo".to_string(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
        });
        let id = client.id;
        ClientStore::insert(&store, client).await.unwrap();

        let removed = ClientStore::delete_many(&store, &[id, Uuid::new_v4()])
            .await
            .unwrap();
        assert_eq!(removed, 1);
    }
}
