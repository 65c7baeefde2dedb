//! Case record models: one episode of treatment, open until discharged.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Admission diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnosis {
    /// Condition keyword (e.g., "fever", "injury")
    pub condition: String,
    /// Species whose stock is consumed for treatment
    pub species: String,
    /// Emergency admission (fee surcharge)
    #[serde(default)]
    pub emergency: bool,
}

impl Diagnosis {
    /// Non-emergency diagnosis.
    pub fn new(condition: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            species: species.into(),
            emergency: false,
        }
    }

    /// Emergency diagnosis.
    pub fn emergency(condition: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            emergency: true,
            ..Self::new(condition, species)
        }
    }
}

/// A billable treatment line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentLineItem {
    /// What was done
    pub description: String,
    /// Cost; absent counts as zero
    pub cost: Option<f64>,
}

/// One case in an animal's medical history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseRecord {
    /// Admission date
    pub date: NaiveDateTime,
    /// Admission diagnosis
    pub diagnosis: Diagnosis,
    /// Treatment line items, in order applied
    pub treatment: Vec<TreatmentLineItem>,
    /// Closed flag
    pub discharged: bool,
    /// Set only at discharge
    pub final_diagnosis: Option<String>,
}

impl CaseRecord {
    /// Open a new case with no treatment.
    pub fn open(date: NaiveDateTime, diagnosis: Diagnosis) -> Self {
        Self {
            date,
            diagnosis,
            treatment: Vec::new(),
            discharged: false,
            final_diagnosis: None,
        }
    }

    pub fn is_emergency(&self) -> bool {
        self.diagnosis.emergency
    }

    /// Sum of line-item costs.
    pub fn treatment_total(&self) -> f64 {
        self.treatment.iter().map(|t| t.cost.unwrap_or(0.0)).sum()
    }
}
