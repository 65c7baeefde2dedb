//! Financial ledger models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One payment, appended at discharge. The ledger is append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialRecord {
    /// Payment date
    pub date: NaiveDateTime,
    /// Animal billed
    pub animal_id: String,
    /// Amount charged
    pub amount: f64,
    /// Payment method (e.g., "credit")
    pub method: String,
    /// Always true; no real payment processing happens
    pub processed: bool,
}
