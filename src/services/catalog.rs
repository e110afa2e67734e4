//! Equipment and manager catalog.
//!
//! External reference data consumed at selection time. Proposals copy the
//! name (and suggested unit value) out of the catalog into their own fields;
//! later catalog edits never propagate back into existing proposals.

use rust_decimal_macros::dec;

use crate::models::proposal::{Equipment, Manager};

pub struct Catalog {
    equipments: Vec<Equipment>,
    managers: Vec<Manager>,
}

impl Catalog {
    /// Seed reference data for equipment models and account managers.
    pub fn seeded() -> Self {
        let equipments = vec![
            Equipment {
                id: "1".to_string(),
                name: "Impressora HP LaserJet Pro".to_string(),
                default_value: dec!(1200),
            },
            Equipment {
                id: "2".to_string(),
                name: "Multifuncional Xerox WorkCentre".to_string(),
                default_value: dec!(2500),
            },
            Equipment {
                id: "3".to_string(),
                name: "Scanner Epson WorkForce".to_string(),
                default_value: dec!(800),
            },
            Equipment {
                id: "4".to_string(),
                name: "Impressora Brother MFC".to_string(),
                default_value: dec!(1500),
            },
            Equipment {
                id: "5".to_string(),
                name: "Plotter HP DesignJet".to_string(),
                default_value: dec!(3800),
            },
        ];
        let managers = vec![Manager {
            id: "5".to_string(),
            name: "Aline".to_string(),
        }];

        Self {
            equipments,
            managers,
        }
    }

    pub fn equipments(&self) -> &[Equipment] {
        &self.equipments
    }

    pub fn managers(&self) -> &[Manager] {
        &self.managers
    }

    pub fn equipment(&self, id: &str) -> Option<&Equipment> {
        self.equipments.iter().find(|e| e.id == id)
    }

    pub fn manager(&self, id: &str) -> Option<&Manager> {
        self.managers.iter().find(|m| m.id == id)
    }
}
