//! Inventory models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-species stock and population.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryEntry {
    /// Registered animals of this species
    pub count: u32,
    /// Food units on hand
    pub food_stock: u64,
    /// Medicine name → units on hand
    pub medicines: BTreeMap<String, u64>,
}

impl InventoryEntry {
    /// Units of a medicine on hand (0 if never stocked).
    pub fn medicine(&self, name: &str) -> u64 {
        self.medicines.get(name).copied().unwrap_or(0)
    }
}

/// Result of consuming one unit of medicine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// One unit taken
    Consumed { remaining: u64 },
    /// Medicine known but at zero; stock stays at zero
    AlreadyEmpty,
    /// Medicine never stocked for the species; nothing changes
    UnknownMedicine,
    /// Species has no inventory entry; nothing changes
    UnknownSpecies,
}
