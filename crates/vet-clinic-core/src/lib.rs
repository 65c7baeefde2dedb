//! Vet Clinic Core Library
//!
//! Operational records for a small veterinary clinic: animals, appointments,
//! staff, inventory and billing.
//!
//! # Architecture
//!
//! ```text
//!   Front end (menu, FFI caller)
//!            │
//!            ▼
//!   ┌──────────────────┐
//!   │  Clinic facade   │  validates referenced animals, owns all state
//!   └────────┬─────────┘
//!            │
//!   ┌────────┼──────────────┬─────────────────┬──────────────┐
//!   ▼        ▼              ▼                 ▼              ▼
//! Scheduler  Case store     Inventory ledger  Staff directory  Report
//! (conflict  (admit →       (per-species      (qualification   (monthly
//!  rollover)  discharge)     stock)            tags)            totals)
//!                  │
//!                  ▼
//!          Financial ledger ──► Billing export
//! ```
//!
//! # Modules
//!
//! - [`clinic`]: The facade owning every collection
//! - [`scheduler`]: Appointment booking with conflict rollover
//! - [`cases`]: Admit/treat/discharge lifecycle and fees
//! - [`inventory`]: Per-species food and medicine stock
//! - [`staff`]: Staff roster and procedure-based assignment
//! - [`report`]: Monthly report
//! - [`export`]: Billing export
//! - [`config`]: JSON configuration and seed data
//! - [`entropy`], [`clock`]: Injectable randomness and time

pub mod cases;
pub mod clinic;
pub mod clock;
pub mod config;
pub mod entropy;
pub mod error;
pub mod export;
pub mod ids;
pub mod inventory;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod staff;

// Re-export commonly used types
pub use clinic::{AnimalStatus, Clinic, HealthStatus, SeededIds};
pub use config::{ClinicConfig, ConfigError, SeedData};
pub use error::{ClinicError, ClinicResult};
pub use export::LedgerExport;
pub use models::{
    Animal, Appointment, AppointmentStatus, CaseRecord, ConsumeOutcome, Diagnosis,
    FinancialRecord, InventoryEntry, ProcedureCategory, StaffMember, TreatmentLineItem,
};
pub use report::{MonthlyReport, ProcedureCount};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum VetClinicError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No active case: {0}")]
    NoActiveCase(String),

    #[error("Case already open: {0}")]
    CaseAlreadyOpen(String),

    #[error("Scheduling exhausted: {0}")]
    SchedulingExhausted(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<ClinicError> for VetClinicError {
    fn from(e: ClinicError) -> Self {
        match e {
            ClinicError::AnimalNotFound(id) => VetClinicError::NotFound(id),
            ClinicError::NoActiveCase(id) => VetClinicError::NoActiveCase(id),
            ClinicError::CaseAlreadyOpen(id) => VetClinicError::CaseAlreadyOpen(id),
            e @ ClinicError::InvalidTreatmentCost(_) => VetClinicError::InvalidInput(e.to_string()),
            e @ ClinicError::SchedulingExhausted { .. } => {
                VetClinicError::SchedulingExhausted(e.to_string())
            }
        }
    }
}

impl From<ConfigError> for VetClinicError {
    fn from(e: ConfigError) -> Self {
        VetClinicError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for VetClinicError {
    fn from(e: serde_json::Error) -> Self {
        VetClinicError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for VetClinicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        VetClinicError::LockPoisoned(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open an empty clinic with default configuration.
#[uniffi::export]
pub fn open_clinic() -> Arc<VetClinicCore> {
    VetClinicCore::wrap(Clinic::default())
}

/// Open an empty clinic from a JSON configuration.
#[uniffi::export]
pub fn open_clinic_with_config(config_json: String) -> Result<Arc<VetClinicCore>, VetClinicError> {
    let config = ClinicConfig::from_json_str(&config_json)?;
    Ok(VetClinicCore::wrap(Clinic::with_config(config)))
}

/// Open a clinic loaded with the default startup data.
#[uniffi::export]
pub fn open_seeded_clinic() -> Arc<VetClinicCore> {
    let mut clinic = Clinic::default();
    let seed = clinic.config().seed.clone();
    clinic.seed(&seed);
    VetClinicCore::wrap(clinic)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe clinic wrapper for FFI. Each call holds the lock for its full duration.
#[derive(uniffi::Object)]
pub struct VetClinicCore {
    clinic: Arc<Mutex<Clinic>>,
}

impl VetClinicCore {
    /// Wrap an existing clinic (e.g., one built with deterministic entropy).
    pub fn wrap(clinic: Clinic) -> Arc<Self> {
        Arc::new(Self {
            clinic: Arc::new(Mutex::new(clinic)),
        })
    }
}

fn parse_date(date: &str) -> Result<chrono::NaiveDateTime, VetClinicError> {
    clock::parse_date_time(date)
        .ok_or_else(|| VetClinicError::InvalidInput(format!("unrecognized date: {}", date)))
}

#[uniffi::export]
impl VetClinicCore {
    // =========================================================================
    // Animal Operations
    // =========================================================================

    /// Register an animal.
    pub fn register_animal(
        &self,
        name: String,
        species: String,
        age: u32,
        owner: String,
    ) -> Result<String, VetClinicError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.register_animal(name, species, age, owner))
    }

    /// Get an animal's status, or `None` if unknown.
    pub fn get_animal_status(
        &self,
        animal_id: String,
    ) -> Result<Option<FfiAnimalStatus>, VetClinicError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.animal_status(&animal_id).map(|s| s.into()))
    }

    /// Register and admit an emergency patient.
    pub fn emergency_admit(
        &self,
        name: String,
        species: String,
        condition: String,
    ) -> Result<String, VetClinicError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.emergency_admit(name, species, condition)?)
    }

    // =========================================================================
    // Scheduling Operations
    // =========================================================================

    /// Schedule an appointment; `date` is `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`.
    pub fn schedule_appointment(
        &self,
        animal_id: String,
        date: String,
        procedure: String,
    ) -> Result<String, VetClinicError> {
        let date = parse_date(&date)?;
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.schedule_appointment(&animal_id, date, &procedure)?)
    }

    /// Appointments for an animal, in booking order.
    pub fn list_appointments(&self, animal_id: String) -> Result<Vec<FfiAppointment>, VetClinicError> {
        let clinic = self.clinic.lock()?;
        let appointments: Vec<FfiAppointment> = clinic
            .appointments_for(&animal_id)
            .cloned()
            .map(|a| a.into())
            .collect();
        Ok(appointments)
    }

    // =========================================================================
    // Case Operations
    // =========================================================================

    /// Admit an animal with a diagnosis.
    pub fn admit_animal(
        &self,
        animal_id: String,
        condition: String,
        species: String,
        emergency: bool,
    ) -> Result<(), VetClinicError> {
        let mut clinic = self.clinic.lock()?;
        let diagnosis = Diagnosis {
            condition,
            species,
            emergency,
        };
        clinic.admit_animal(&animal_id, diagnosis)?;
        Ok(())
    }

    /// Add a treatment line item to the open case.
    pub fn add_treatment(
        &self,
        animal_id: String,
        description: String,
        cost: Option<f64>,
    ) -> Result<(), VetClinicError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.add_treatment(&animal_id, description, cost)?)
    }

    /// Discharge an animal; returns the amount billed.
    pub fn discharge_animal(
        &self,
        animal_id: String,
        final_diagnosis: String,
    ) -> Result<f64, VetClinicError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.discharge_animal(&animal_id, final_diagnosis)?)
    }

    // =========================================================================
    // Staff & Inventory Operations
    // =========================================================================

    /// Add a staff member.
    pub fn add_staff_member(
        &self,
        name: String,
        position: String,
        qualifications: Vec<String>,
    ) -> Result<String, VetClinicError> {
        let mut clinic = self.clinic.lock()?;
        Ok(clinic.add_staff_member(name, position, qualifications))
    }

    /// Restock food (`item == "food"`) or a medicine.
    pub fn restock_inventory(
        &self,
        species: String,
        item: String,
        quantity: u64,
    ) -> Result<(), VetClinicError> {
        let mut clinic = self.clinic.lock()?;
        clinic.restock_inventory(&species, &item, quantity);
        Ok(())
    }

    /// Inventory for a species, or `None` if never referenced.
    pub fn get_inventory(
        &self,
        species: String,
    ) -> Result<Option<FfiInventoryEntry>, VetClinicError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic
            .inventory_entry(&species)
            .map(|e| FfiInventoryEntry::from_entry(&species, e)))
    }

    // =========================================================================
    // Reporting & Export Operations
    // =========================================================================

    /// Monthly report; `month` is zero-based (0 = January).
    pub fn generate_monthly_report(
        &self,
        month: u32,
        year: i32,
    ) -> Result<FfiMonthlyReport, VetClinicError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.generate_monthly_report(month, year).into())
    }

    /// Export billing data as JSON.
    pub fn export_billing_json(&self) -> Result<String, VetClinicError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.export_billing().to_json()?)
    }

    /// Export billing data as CSV.
    pub fn export_billing_csv(&self) -> Result<String, VetClinicError> {
        let clinic = self.clinic.lock()?;
        Ok(clinic.export_billing().to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub animal_id: String,
    pub date: String,
    pub procedure: String,
    pub staff_id: Option<String>,
    pub status: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(apt: Appointment) -> Self {
        Self {
            id: apt.id,
            animal_id: apt.animal_id,
            date: apt.date.format("%Y-%m-%d %H:%M").to_string(),
            procedure: apt.procedure,
            staff_id: apt.staff_id,
            status: "scheduled".into(),
        }
    }
}

/// FFI-safe animal status.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnimalStatus {
    pub name: String,
    pub status: String,
    pub last_procedure: Option<FfiAppointment>,
}

impl From<AnimalStatus> for FfiAnimalStatus {
    fn from(status: AnimalStatus) -> Self {
        Self {
            name: status.name,
            status: status.status.as_str().to_string(),
            last_procedure: status.last_procedure.map(|a| a.into()),
        }
    }
}

/// FFI-safe procedure frequency.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProcedureCount {
    pub procedure: String,
    pub count: u32,
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// FFI-safe monthly report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMonthlyReport {
    pub total_appointments: u32,
    pub revenue: f64,
    pub animals_treated: u32,
    pub common_procedures: Vec<FfiProcedureCount>,
}

impl From<MonthlyReport> for FfiMonthlyReport {
    fn from(report: MonthlyReport) -> Self {
        Self {
            total_appointments: saturating_u32(report.total_appointments),
            revenue: report.revenue,
            animals_treated: saturating_u32(report.animals_treated),
            common_procedures: report
                .common_procedures
                .into_iter()
                .map(|c| FfiProcedureCount {
                    procedure: c.procedure,
                    count: saturating_u32(c.count),
                })
                .collect(),
        }
    }
}

/// FFI-safe medicine stock line.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicineStock {
    pub name: String,
    pub quantity: u64,
}

/// FFI-safe inventory entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryEntry {
    pub species: String,
    pub count: u32,
    pub food_stock: u64,
    pub medicines: Vec<FfiMedicineStock>,
}

impl FfiInventoryEntry {
    fn from_entry(species: &str, entry: &InventoryEntry) -> Self {
        Self {
            species: species.to_string(),
            count: entry.count,
            food_stock: entry.food_stock,
            medicines: entry
                .medicines
                .iter()
                .map(|(name, quantity)| FfiMedicineStock {
                    name: name.clone(),
                    quantity: *quantity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_saturate_at_u32_max() {
        assert_eq!(saturating_u32(7), 7);
        assert_eq!(saturating_u32(u32::MAX as usize), u32::MAX);
        if let Ok(big) = usize::try_from(u64::from(u32::MAX) + 1) {
            assert_eq!(saturating_u32(big), u32::MAX);
        }
    }
}
