use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Contract pricing model offered to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, ToSchema)]
pub enum ContractType {
    #[serde(rename = "Taxa Fixa")]
    #[strum(serialize = "Taxa Fixa")]
    TaxaFixa,
    #[serde(rename = "Variável")]
    #[strum(serialize = "Variável")]
    Variavel,
    #[serde(rename = "Híbrido")]
    #[strum(serialize = "Híbrido")]
    Hibrido,
    #[serde(rename = "Por Produção")]
    #[strum(serialize = "Por Produção")]
    PorProducao,
}

/// How the deal relates to the client's existing contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, ToSchema)]
pub enum Classification {
    #[serde(rename = "Novo")]
    #[strum(serialize = "Novo")]
    Novo,
    #[serde(rename = "Renovação")]
    #[strum(serialize = "Renovação")]
    Renovacao,
    #[serde(rename = "Expansão")]
    #[strum(serialize = "Expansão")]
    Expansao,
    #[serde(rename = "Aditivo")]
    #[strum(serialize = "Aditivo")]
    Aditivo,
}

/// Commercial opportunity category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, ToSchema)]
pub enum Opportunity {
    #[serde(rename = "MPS")]
    #[strum(serialize = "MPS")]
    Mps,
    #[serde(rename = "Venda Direta")]
    #[strum(serialize = "Venda Direta")]
    VendaDireta,
    #[serde(rename = "Locação")]
    #[strum(serialize = "Locação")]
    Locacao,
    #[serde(rename = "Outsourcing")]
    #[strum(serialize = "Outsourcing")]
    Outsourcing,
    #[serde(rename = "Venda")]
    #[strum(serialize = "Venda")]
    Venda,
}

/// Lifecycle status of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, ToSchema)]
pub enum ProposalStatus {
    #[serde(rename = "Em aberto")]
    #[strum(serialize = "Em aberto")]
    EmAberto,
    #[serde(rename = "Fechada")]
    #[strum(serialize = "Fechada")]
    Fechada,
    #[serde(rename = "Perdida")]
    #[strum(serialize = "Perdida")]
    Perdida,
    #[serde(rename = "Cancelada")]
    #[strum(serialize = "Cancelada")]
    Cancelada,
    #[serde(rename = "Em negociação")]
    #[strum(serialize = "Em negociação")]
    EmNegociacao,
    #[serde(rename = "Aprovada")]
    #[strum(serialize = "Aprovada")]
    Aprovada,
    #[serde(rename = "Reprovada")]
    #[strum(serialize = "Reprovada")]
    Reprovada,
}

/// One priced equipment line inside a proposal.
///
/// `equipment_name` is a snapshot copied from the catalog at selection time;
/// it does not follow later catalog renames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProposalItem {
    /// Unique identifier for the line, assigned at creation.
    pub id: Uuid,

    /// Catalog reference for the selected equipment.
    pub equipment_id: String,

    /// Denormalized equipment name, snapshotted at selection time.
    pub equipment_name: String,

    /// Unit sale/lease value for the equipment.
    pub unit_value: Decimal,

    /// Number of units. Must be positive to pass validation.
    pub quantity: i32,

    /// Monthly black & white page volume.
    pub monthly_volume_pb: i64,

    /// Monthly color page volume.
    pub monthly_volume_color: i64,

    /// Cost per black & white page.
    pub cost_pb: Decimal,

    /// Cost per color page.
    pub cost_color: Decimal,

    /// Flat monthly labor cost for the line.
    pub cost_labor: Decimal,

    /// Flat monthly parts cost for the line.
    pub cost_parts: Decimal,
}

impl ProposalItem {
    /// A fresh line with the editor defaults: one unit, standard page costs,
    /// everything else zeroed.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            equipment_id: String::new(),
            equipment_name: String::new(),
            unit_value: Decimal::ZERO,
            quantity: 1,
            monthly_volume_pb: 0,
            monthly_volume_color: 0,
            cost_pb: dec!(0.05),
            cost_color: dec!(0.15),
            cost_labor: Decimal::ZERO,
            cost_parts: Decimal::ZERO,
        }
    }
}

impl Default for ProposalItem {
    fn default() -> Self {
        Self::new()
    }
}

/// Derived monetary totals for a proposal. Never edited directly; always the
/// output of the pricing calculator over the current items and term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProposalTotals {
    /// Sum of flat per-item cost rates, independent of term length.
    pub fixed_rate_total: Decimal,

    /// Term-scaled sum of volume-based monthly costs.
    pub production_total: Decimal,

    /// Fixed rate total plus production total.
    pub grand_total: Decimal,
}

/// A commercial quote: the root aggregate owning its line items and totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Proposal {
    /// Primary key.
    pub id: Uuid,

    /// Display code, `PROP-<year>-<4 digits>`. Assigned once, never regenerated.
    pub number: String,

    /// Issue date.
    pub date: NaiveDate,

    /// Expiry date. No ordering against `date` is enforced.
    pub valid_until: NaiveDate,

    /// Catalog reference for the attributed manager.
    pub manager_id: String,

    /// Denormalized manager name, snapshotted at selection time.
    pub manager_name: String,

    /// Short description of the deal. Required.
    pub title: String,

    /// Client name as free text. Required.
    pub client: String,

    /// Contact person at the client.
    pub contact: String,

    pub contract_type: ContractType,
    pub classification: Classification,
    pub opportunity: Opportunity,

    /// Contract term in months. Must be positive to pass validation.
    pub term: i32,

    pub status: ProposalStatus,

    /// Estimated close probability, 0-100. Advisory only; not range-checked.
    pub probability: i32,

    /// Free-text notes.
    pub observation: String,

    /// Line items, insertion order preserved. May be empty.
    pub items: Vec<ProposalItem>,

    /// Derived totals; recomputed after every item or term mutation.
    pub totals: ProposalTotals,
}

impl Proposal {
    /// A freshly opened proposal: generated number, today's dates, empty
    /// items, zero totals. Every other field starts at the editor defaults.
    pub fn new(number: String) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            id: Uuid::new_v4(),
            number,
            date: today,
            valid_until: today,
            manager_id: String::new(),
            manager_name: String::new(),
            title: String::new(),
            client: String::new(),
            contact: String::new(),
            contract_type: ContractType::TaxaFixa,
            classification: Classification::Novo,
            opportunity: Opportunity::Mps,
            term: 1,
            status: ProposalStatus::EmAberto,
            probability: 0,
            observation: String::new(),
            items: Vec::new(),
            totals: ProposalTotals::default(),
        }
    }
}

/// Equipment catalog record consumed when building a line item.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    /// Suggested unit value applied when the equipment is selected.
    pub default_value: Decimal,
}

/// Manager catalog record consumed when attributing a proposal.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Manager {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_carries_editor_defaults() {
        let item = ProposalItem::new();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.cost_pb, dec!(0.05));
        assert_eq!(item.cost_color, dec!(0.15));
        assert_eq!(item.cost_labor, Decimal::ZERO);
        assert_eq!(item.monthly_volume_pb, 0);
    }

    #[test]
    fn enum_literals_survive_serialization() {
        assert_eq!(
            serde_json::to_string(&ContractType::TaxaFixa).unwrap(),
            "\"Taxa Fixa\""
        );
        assert_eq!(
            serde_json::to_string(&ProposalStatus::EmNegociacao).unwrap(),
            "\"Em negociação\""
        );
        assert_eq!(Opportunity::VendaDireta.to_string(), "Venda Direta");
        let parsed: Classification = serde_json::from_str("\"Renovação\"").unwrap();
        assert_eq!(parsed, Classification::Renovacao);
    }

    #[test]
    fn default_totals_are_zero() {
        let totals = ProposalTotals::default();
        assert_eq!(totals.fixed_rate_total, Decimal::ZERO);
        assert_eq!(totals.production_total, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }
}
