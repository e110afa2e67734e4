//! Proposal aggregate service.
//!
//! Owns the lifecycle of a proposal: creation with a generated number, field
//! and item mutations, and deletion. Totals are recomputed inside the store's
//! per-proposal mutation guard after every item or term change, so a read
//! never observes items and totals from different logical mutations.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::visibility::filter_proposals;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::proposal::{
    Classification, ContractType, Opportunity, Proposal, ProposalItem, ProposalStatus,
};
use crate::models::user::User;
use crate::services::catalog::Catalog;
use crate::services::numbering::generate_proposal_number;
use crate::services::pricing::proposal_totals;
use crate::services::validation::{validate_item, validate_proposal, ProposalValidation};
use crate::store::ProposalStore;

/// How many fresh numbers to try before accepting a possible duplicate.
/// The generator's collision space is 1-in-10000 per year; after this many
/// misses we fall back to source behavior and keep the last candidate.
const NUMBER_RETRIES: usize = 5;

/// Header fields of a proposal, as submitted by the editor. The manager name
/// is not accepted from callers; it is snapshotted from the catalog here.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct ProposalDetails {
    pub date: NaiveDate,
    pub valid_until: NaiveDate,
    pub manager_id: String,
    pub title: String,
    pub client: String,
    #[serde(default)]
    pub contact: String,
    pub contract_type: ContractType,
    pub classification: Classification,
    pub opportunity: Opportunity,
    pub term: i32,
    pub status: ProposalStatus,
    #[serde(default)]
    pub probability: i32,
    #[serde(default)]
    pub observation: String,
}

/// A line item as submitted by the editor. Omitted numeric fields fall back
/// to the editor defaults; an omitted equipment name or zero unit value is
/// snapshotted from the catalog entry.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ItemInput {
    pub equipment_id: String,
    #[serde(default)]
    pub equipment_name: Option<String>,
    #[serde(default)]
    pub unit_value: Option<Decimal>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub monthly_volume_pb: i64,
    #[serde(default)]
    pub monthly_volume_color: i64,
    #[serde(default = "default_cost_pb")]
    pub cost_pb: Decimal,
    #[serde(default = "default_cost_color")]
    pub cost_color: Decimal,
    #[serde(default)]
    pub cost_labor: Decimal,
    #[serde(default)]
    pub cost_parts: Decimal,
}

fn default_quantity() -> i32 {
    1
}

fn default_cost_pb() -> Decimal {
    dec!(0.05)
}

fn default_cost_color() -> Decimal {
    dec!(0.15)
}

pub struct ProposalService {
    store: Arc<dyn ProposalStore>,
    catalog: Arc<Catalog>,
    events: EventSender,
}

impl ProposalService {
    pub fn new(store: Arc<dyn ProposalStore>, catalog: Arc<Catalog>, events: EventSender) -> Self {
        Self {
            store,
            catalog,
            events,
        }
    }

    /// Open a fresh proposal: generated number, empty items, zero totals.
    pub async fn create(&self) -> Result<Proposal, ServiceError> {
        let mut number = generate_proposal_number();
        for _ in 0..NUMBER_RETRIES {
            if self.store.find_by_number(&number).await?.is_none() {
                break;
            }
            tracing::warn!(%number, "proposal number collision, regenerating");
            number = generate_proposal_number();
        }

        let proposal = Proposal::new(number);
        self.store.insert(proposal.clone()).await?;
        tracing::info!(proposal_id = %proposal.id, number = %proposal.number, "proposal created");
        self.events.emit(Event::ProposalCreated(proposal.id));
        Ok(proposal)
    }

    pub async fn get(&self, id: Uuid) -> Result<Proposal, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Proposal {} not found", id)))
    }

    /// All proposals the acting user may see, in creation order. The filter
    /// is a read-time projection; stored data is never touched.
    pub async fn list_visible(
        &self,
        user: &User,
        directory: &[User],
    ) -> Result<Vec<Proposal>, ServiceError> {
        let proposals = self.store.list().await?;
        Ok(filter_proposals(user, directory, proposals))
    }

    /// Replace the proposal header. This is the editor's save path, so the
    /// result is validated and rejected with the offending field names if
    /// incomplete. The manager name is snapshotted from the catalog.
    pub async fn update_details(
        &self,
        id: Uuid,
        details: ProposalDetails,
    ) -> Result<Proposal, ServiceError> {
        let manager_name = self
            .catalog
            .manager(&details.manager_id)
            .map(|m| m.name.clone())
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Manager {} not found", details.manager_id))
            })?;

        let updated = self
            .store
            .mutate(
                id,
                Box::new(move |proposal| {
                    // Validate a candidate copy first; the stored record must
                    // stay untouched when the save is rejected.
                    let mut candidate = proposal.clone();
                    candidate.date = details.date;
                    candidate.valid_until = details.valid_until;
                    candidate.manager_id = details.manager_id;
                    candidate.manager_name = manager_name;
                    candidate.title = details.title;
                    candidate.client = details.client;
                    candidate.contact = details.contact;
                    candidate.contract_type = details.contract_type;
                    candidate.classification = details.classification;
                    candidate.opportunity = details.opportunity;
                    candidate.term = details.term;
                    candidate.status = details.status;
                    candidate.probability = details.probability;
                    candidate.observation = details.observation;
                    candidate.totals = proposal_totals(&candidate.items, candidate.term);

                    let validation = validate_proposal(&candidate);
                    if !validation.valid {
                        return Err(field_validation_error(&validation));
                    }
                    *proposal = candidate;
                    Ok(())
                }),
            )
            .await?;

        self.events.emit(Event::ProposalUpdated(id));
        Ok(updated)
    }

    /// Append a line item. The item is validated on the way in; equipment
    /// name and default unit value are snapshotted from the catalog when the
    /// editor did not supply them.
    pub async fn add_item(&self, id: Uuid, input: ItemInput) -> Result<Proposal, ServiceError> {
        let item = self.build_item(Uuid::new_v4(), input)?;

        let updated = self
            .store
            .mutate(
                id,
                Box::new(move |proposal| {
                    proposal.items.push(item);
                    proposal.totals = proposal_totals(&proposal.items, proposal.term);
                    Ok(())
                }),
            )
            .await?;

        self.events.emit(Event::ProposalUpdated(id));
        Ok(updated)
    }

    /// Replace an existing line item, keeping its id.
    pub async fn update_item(
        &self,
        id: Uuid,
        item_id: Uuid,
        input: ItemInput,
    ) -> Result<Proposal, ServiceError> {
        let item = self.build_item(item_id, input)?;

        let updated = self
            .store
            .mutate(
                id,
                Box::new(move |proposal| {
                    let slot = proposal
                        .items
                        .iter_mut()
                        .find(|i| i.id == item_id)
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Item {} not found", item_id))
                        })?;
                    *slot = item;
                    proposal.totals = proposal_totals(&proposal.items, proposal.term);
                    Ok(())
                }),
            )
            .await?;

        self.events.emit(Event::ProposalUpdated(id));
        Ok(updated)
    }

    /// Remove a line item. This is the only deletion path for an item.
    pub async fn remove_item(&self, id: Uuid, item_id: Uuid) -> Result<Proposal, ServiceError> {
        let updated = self
            .store
            .mutate(
                id,
                Box::new(move |proposal| {
                    let before = proposal.items.len();
                    proposal.items.retain(|i| i.id != item_id);
                    if proposal.items.len() == before {
                        return Err(ServiceError::NotFound(format!(
                            "Item {} not found",
                            item_id
                        )));
                    }
                    proposal.totals = proposal_totals(&proposal.items, proposal.term);
                    Ok(())
                }),
            )
            .await?;

        self.events.emit(Event::ProposalUpdated(id));
        Ok(updated)
    }

    pub async fn set_term(&self, id: Uuid, term: i32) -> Result<Proposal, ServiceError> {
        let updated = self
            .store
            .mutate(
                id,
                Box::new(move |proposal| {
                    proposal.term = term;
                    proposal.totals = proposal_totals(&proposal.items, proposal.term);
                    Ok(())
                }),
            )
            .await?;

        self.events.emit(Event::ProposalUpdated(id));
        Ok(updated)
    }

    pub async fn set_status(&self, id: Uuid, status: ProposalStatus) -> Result<Proposal, ServiceError> {
        let updated = self
            .store
            .mutate(
                id,
                Box::new(move |proposal| {
                    proposal.status = status;
                    Ok(())
                }),
            )
            .await?;

        self.events.emit(Event::ProposalUpdated(id));
        Ok(updated)
    }

    /// Explicit recompute request. A no-op unless something drifted, but the
    /// editor exposes it and it keeps the totals invariant observable.
    pub async fn recalculate(&self, id: Uuid) -> Result<Proposal, ServiceError> {
        self.store
            .mutate(
                id,
                Box::new(|proposal| {
                    proposal.totals = proposal_totals(&proposal.items, proposal.term);
                    Ok(())
                }),
            )
            .await
    }

    /// Run header validation and hand the structured result back to the
    /// caller without touching the proposal.
    pub async fn validate(&self, id: Uuid) -> Result<ProposalValidation, ServiceError> {
        let proposal = self.get(id).await?;
        Ok(validate_proposal(&proposal))
    }

    /// Delete the proposal; its items go with it.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(format!("Proposal {} not found", id)));
        }
        tracing::info!(proposal_id = %id, "proposal deleted");
        self.events.emit(Event::ProposalDeleted(id));
        Ok(())
    }

    fn build_item(&self, item_id: Uuid, input: ItemInput) -> Result<ProposalItem, ServiceError> {
        let equipment = self.catalog.equipment(&input.equipment_id);

        let equipment_name = input
            .equipment_name
            .or_else(|| equipment.map(|e| e.name.clone()))
            .unwrap_or_default();
        let unit_value = input
            .unit_value
            .or_else(|| equipment.map(|e| e.default_value))
            .unwrap_or(Decimal::ZERO);

        let item = ProposalItem {
            id: item_id,
            equipment_id: input.equipment_id,
            equipment_name,
            unit_value,
            quantity: input.quantity,
            monthly_volume_pb: input.monthly_volume_pb,
            monthly_volume_color: input.monthly_volume_color,
            cost_pb: input.cost_pb,
            cost_color: input.cost_color,
            cost_labor: input.cost_labor,
            cost_parts: input.cost_parts,
        };

        let validation = validate_item(&item);
        if !validation.valid {
            return Err(ServiceError::FieldValidation(
                validation
                    .errors
                    .iter()
                    .map(|f| f.as_str().to_string())
                    .collect(),
            ));
        }
        Ok(item)
    }
}

fn field_validation_error(validation: &ProposalValidation) -> ServiceError {
    ServiceError::FieldValidation(
        validation
            .errors
            .iter()
            .map(|f| f.as_str().to_string())
            .collect(),
    )
}
