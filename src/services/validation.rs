//! Required-field validation for proposals and their line items.
//!
//! Validators are pure: they never mutate their input and report failures as
//! a set of offending field names rather than an error. Callers surface the
//! set to the editor and re-run validation after every correction.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::proposal::{Proposal, ProposalItem};

/// Line-item fields that can fail validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    EquipmentId,
    UnitValue,
    Quantity,
}

impl ItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::EquipmentId => "equipment_id",
            ItemField::UnitValue => "unit_value",
            ItemField::Quantity => "quantity",
        }
    }
}

/// Proposal header fields that can fail validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProposalField {
    Title,
    Client,
    ManagerId,
    Term,
}

impl ProposalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalField::Title => "title",
            ProposalField::Client => "client",
            ProposalField::ManagerId => "manager_id",
            ProposalField::Term => "term",
        }
    }
}

/// Outcome of validating a single line item.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ItemValidation {
    pub valid: bool,
    pub errors: BTreeSet<ItemField>,
}

/// Outcome of validating a proposal header.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ProposalValidation {
    pub valid: bool,
    pub errors: BTreeSet<ProposalField>,
}

/// Flags a line item's missing equipment reference and non-positive unit
/// value or quantity. Zero volumes and costs are legitimate and not flagged.
pub fn validate_item(item: &ProposalItem) -> ItemValidation {
    let mut errors = BTreeSet::new();

    if item.equipment_id.is_empty() {
        errors.insert(ItemField::EquipmentId);
    }
    if item.unit_value <= Decimal::ZERO {
        errors.insert(ItemField::UnitValue);
    }
    if item.quantity <= 0 {
        errors.insert(ItemField::Quantity);
    }

    ItemValidation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Flags an empty title or client, a missing manager reference, and a
/// non-positive term. There is deliberately no cross-field or cross-item
/// checking here: an empty item list passes, and `probability` is advisory.
pub fn validate_proposal(proposal: &Proposal) -> ProposalValidation {
    let mut errors = BTreeSet::new();

    if proposal.title.is_empty() {
        errors.insert(ProposalField::Title);
    }
    if proposal.client.is_empty() {
        errors.insert(ProposalField::Client);
    }
    if proposal.manager_id.is_empty() {
        errors.insert(ProposalField::ManagerId);
    }
    if proposal.term <= 0 {
        errors.insert(ProposalField::Term);
    }

    ProposalValidation {
        valid: errors.is_empty(),
        errors,
    }
}
