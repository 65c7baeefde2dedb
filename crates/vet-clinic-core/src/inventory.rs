//! Per-species inventory ledger.
//!
//! Handles:
//! - Population counts (one per registered animal)
//! - Food and medicine restocks
//! - Medicine consumption on admission, floored at zero

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{ConsumeOutcome, InventoryEntry};

/// Restock item name that targets food stock instead of a medicine.
pub const FOOD_ITEM: &str = "food";

/// Inventory keyed by species. Entries are created lazily.
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    entries: BTreeMap<String, InventoryEntry>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the entry for a species.
    pub fn ensure_species(&mut self, species: &str) -> &mut InventoryEntry {
        self.entries.entry(species.to_string()).or_default()
    }

    /// Count one more registered animal of `species`.
    pub fn increment_population(&mut self, species: &str) {
        self.ensure_species(species).count += 1;
    }

    /// Add stock. `item == "food"` goes to food stock; anything else is a medicine.
    pub fn restock(&mut self, species: &str, item: &str, quantity: u64) {
        let entry = self.ensure_species(species);
        if item == FOOD_ITEM {
            entry.food_stock += quantity;
        } else {
            *entry.medicines.entry(item.to_string()).or_insert(0) += quantity;
        }
    }

    /// Take one unit of a medicine.
    ///
    /// Unknown species or medicine is a no-op, not an error.
    pub fn consume(&mut self, species: &str, medicine: &str) -> ConsumeOutcome {
        let Some(entry) = self.entries.get_mut(species) else {
            debug!(species, medicine, "no inventory for species, skipping");
            return ConsumeOutcome::UnknownSpecies;
        };
        let Some(stock) = entry.medicines.get_mut(medicine) else {
            debug!(species, medicine, "medicine never stocked, skipping");
            return ConsumeOutcome::UnknownMedicine;
        };
        if *stock == 0 {
            debug!(species, medicine, "medicine out of stock");
            return ConsumeOutcome::AlreadyEmpty;
        }
        *stock -= 1;
        ConsumeOutcome::Consumed { remaining: *stock }
    }

    /// Entry for a species, if one exists.
    pub fn entry(&self, species: &str) -> Option<&InventoryEntry> {
        self.entries.get(species)
    }
}

/// Medicines indicated for a condition keyword. Unknown conditions need none.
pub fn medications_for(condition: &str) -> &'static [&'static str] {
    match condition {
        "fever" => &["antipyretic", "antibiotic"],
        "injury" => &["painkiller", "antibiotic"],
        "infection" => &["antibiotic"],
        "allergy" => &["antihistamine"],
        _ => &[],
    }
}
