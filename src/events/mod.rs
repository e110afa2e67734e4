//! Domain event channel.
//!
//! Services emit events after successful mutations; a background consumer
//! turns them into notifications (currently structured log lines). This is
//! the injected notification port: the pricing/validation core never touches
//! it, and losing an event never fails the originating operation.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Events emitted by the proposal, client, and product services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ProposalCreated(Uuid),
    ProposalUpdated(Uuid),
    ProposalDeleted(Uuid),
    ClientCreated(Uuid),
    ClientUpdated(Uuid),
    ClientDeleted(Uuid),
    ClientsImported(usize),
    ProductCreated(Uuid),
    ProductUpdated(Uuid),
    ProductDeleted(Uuid),
    ProductsImported(usize),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Emit an event, logging instead of failing when the consumer is gone
    /// or the channel is full.
    pub fn emit(&self, event: Event) {
        if let Err(err) = self.sender.try_send(event) {
            warn!("dropping event: {}", err);
        }
    }
}

/// Create a connected sender/consumer pair with the given channel capacity.
pub fn channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}

/// Drain the event channel, logging each event. Runs until every sender is
/// dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::ProposalCreated(id) => info!(proposal_id = %id, "proposal created"),
            Event::ProposalUpdated(id) => info!(proposal_id = %id, "proposal updated"),
            Event::ProposalDeleted(id) => info!(proposal_id = %id, "proposal deleted"),
            Event::ClientCreated(id) => info!(client_id = %id, "client created"),
            Event::ClientUpdated(id) => info!(client_id = %id, "client updated"),
            Event::ClientDeleted(id) => info!(client_id = %id, "client deleted"),
            Event::ClientsImported(count) => info!(count, "clients imported"),
            Event::ProductCreated(id) => info!(product_id = %id, "product created"),
            Event::ProductUpdated(id) => info!(product_id = %id, "product updated"),
            Event::ProductDeleted(id) => info!(product_id = %id, "product deleted"),
            Event::ProductsImported(count) => info!(count, "products imported"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emitted_events_reach_the_consumer() {
        let (sender, mut receiver) = channel(8);
        let id = Uuid::new_v4();
        sender.emit(Event::ProposalCreated(id));

        match receiver.recv().await {
            Some(Event::ProposalCreated(got)) => assert_eq!(got, id),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn emit_does_not_fail_when_channel_is_full() {
        let (sender, _receiver) = channel(1);
        sender.emit(Event::ClientsImported(1));
        // Second emit overflows the capacity-1 channel; it must only warn.
        sender.emit(Event::ClientsImported(2));
    }
}
