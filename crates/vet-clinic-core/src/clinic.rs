//! Clinic facade: owns every collection and exposes the clinic operations.
//!
//! All state changes go through `Clinic` methods. The type is single-actor;
//! wrap it in a mutex to share it (see [`crate::VetClinicCore`]).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cases::{self, FeeSchedule, MedicineUsage};
use crate::clock::{Clock, SystemClock};
use crate::config::{ClinicConfig, SeedData};
use crate::entropy::{Entropy, RngEntropy};
use crate::error::{ClinicError, ClinicResult};
use crate::export::LedgerExport;
use crate::ids::{new_id, ANIMAL_PREFIX};
use crate::inventory::InventoryLedger;
use crate::models::{
    Animal, Appointment, CaseRecord, Diagnosis, FinancialRecord, InventoryEntry, StaffMember,
    TreatmentLineItem,
};
use crate::report::{self, MonthlyReport};
use crate::scheduler::AppointmentScheduler;
use crate::staff::StaffDirectory;

/// Current health state of an animal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Has an open case
    Hospitalized,
    /// No open case
    Healthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Hospitalized => "hospitalized",
            HealthStatus::Healthy => "healthy",
        }
    }
}

/// Status view for one animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimalStatus {
    pub name: String,
    pub status: HealthStatus,
    /// Latest-dated appointment for the animal
    pub last_procedure: Option<Appointment>,
}

/// IDs created by [`Clinic::seed`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeededIds {
    pub animals: Vec<String>,
    pub staff: Vec<String>,
}

/// The clinic aggregate.
pub struct Clinic {
    config: ClinicConfig,
    fees: FeeSchedule,
    animals: Vec<Animal>,
    scheduler: AppointmentScheduler,
    staff: StaffDirectory,
    inventory: InventoryLedger,
    financial_records: Vec<FinancialRecord>,
    entropy: Box<dyn Entropy>,
    clock: Box<dyn Clock>,
}

impl Default for Clinic {
    fn default() -> Self {
        Self::with_config(ClinicConfig::default())
    }
}

impl Clinic {
    /// Create an empty clinic with explicit randomness and time sources.
    pub fn new(config: ClinicConfig, entropy: Box<dyn Entropy>, clock: Box<dyn Clock>) -> Self {
        Self {
            fees: config.fee_schedule(),
            scheduler: AppointmentScheduler::new(config.reschedule_policy()),
            config,
            animals: Vec::new(),
            staff: StaffDirectory::new(),
            inventory: InventoryLedger::new(),
            financial_records: Vec::new(),
            entropy,
            clock,
        }
    }

    /// Create an empty clinic using OS randomness and the wall clock.
    pub fn with_config(config: ClinicConfig) -> Self {
        Self::new(config, Box::new(RngEntropy::from_os()), Box::new(SystemClock))
    }

    /// Load startup data: animals, then staff, then stock.
    pub fn seed(&mut self, seed: &SeedData) -> SeededIds {
        let animals: Vec<String> = seed
            .animals
            .iter()
            .map(|a| {
                self.register_animal(
                    a.name.clone(),
                    a.species.clone(),
                    a.age,
                    a.owner.clone(),
                )
            })
            .collect();
        let staff: Vec<String> = seed
            .staff
            .iter()
            .map(|s| {
                self.add_staff_member(s.name.clone(), s.position.clone(), s.qualifications.clone())
            })
            .collect();
        for stock in &seed.stock {
            self.restock_inventory(&stock.species, &stock.item, stock.quantity);
        }
        SeededIds { animals, staff }
    }

    // =========================================================================
    // Animals
    // =========================================================================

    /// Register an animal and count it in its species' inventory entry.
    pub fn register_animal(
        &mut self,
        name: String,
        species: String,
        age: u32,
        owner: String,
    ) -> String {
        let id = new_id(ANIMAL_PREFIX, self.entropy.as_mut());
        self.inventory.increment_population(&species);
        info!(animal_id = %id, %name, %species, "animal registered");
        self.animals
            .push(Animal::new(id.clone(), name, species, age, owner));
        id
    }

    pub fn animal(&self, animal_id: &str) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == animal_id)
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    /// Name, hospitalization state and latest appointment. `None` if unknown.
    pub fn animal_status(&self, animal_id: &str) -> Option<AnimalStatus> {
        let animal = self.animal(animal_id)?;
        let status = if animal.is_hospitalized() {
            HealthStatus::Hospitalized
        } else {
            HealthStatus::Healthy
        };
        Some(AnimalStatus {
            name: animal.name.clone(),
            status,
            last_procedure: self.scheduler.last_for_animal(animal_id).cloned(),
        })
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Book an appointment, moving it later on staff/time conflicts.
    pub fn schedule_appointment(
        &mut self,
        animal_id: &str,
        date: NaiveDateTime,
        procedure: &str,
    ) -> ClinicResult<String> {
        if self.animal(animal_id).is_none() {
            return Err(ClinicError::AnimalNotFound(animal_id.to_string()));
        }
        self.scheduler.schedule(
            animal_id,
            date,
            procedure,
            &self.staff,
            self.entropy.as_mut(),
        )
    }

    pub fn appointments(&self) -> &[Appointment] {
        self.scheduler.appointments()
    }

    pub fn appointments_for<'a>(
        &'a self,
        animal_id: &'a str,
    ) -> impl Iterator<Item = &'a Appointment> + 'a {
        self.scheduler.for_animal(animal_id)
    }

    // =========================================================================
    // Case lifecycle
    // =========================================================================

    /// Open a case and draw indicated medicine from the diagnosis species' stock.
    pub fn admit_animal(
        &mut self,
        animal_id: &str,
        diagnosis: Diagnosis,
    ) -> ClinicResult<Vec<MedicineUsage>> {
        let date = self.clock.now();
        let animal = self
            .animals
            .iter_mut()
            .find(|a| a.id == animal_id)
            .ok_or_else(|| ClinicError::AnimalNotFound(animal_id.to_string()))?;
        cases::admit(animal, diagnosis, date, &mut self.inventory)
    }

    /// Add a billable line item to the animal's open case.
    pub fn add_treatment(
        &mut self,
        animal_id: &str,
        description: String,
        cost: Option<f64>,
    ) -> ClinicResult<()> {
        let animal = self
            .animals
            .iter_mut()
            .find(|a| a.id == animal_id)
            .ok_or_else(|| ClinicError::AnimalNotFound(animal_id.to_string()))?;
        cases::add_treatment(animal, TreatmentLineItem { description, cost })
    }

    /// Close the open case, bill it, and return the amount charged.
    pub fn discharge_animal(&mut self, animal_id: &str, final_diagnosis: String) -> ClinicResult<f64> {
        let animal = self
            .animals
            .iter_mut()
            .find(|a| a.id == animal_id)
            .ok_or_else(|| ClinicError::AnimalNotFound(animal_id.to_string()))?;
        let (_, fee) = cases::discharge(animal, final_diagnosis, &self.fees)?;

        self.financial_records.push(FinancialRecord {
            date: self.clock.now(),
            animal_id: animal_id.to_string(),
            amount: fee,
            method: self.config.billing.payment_method.clone(),
            processed: true,
        });
        Ok(fee)
    }

    /// Register an unknown-owner animal and admit it as an emergency.
    pub fn emergency_admit(
        &mut self,
        name: String,
        species: String,
        condition: String,
    ) -> ClinicResult<String> {
        let owner = self.config.emergency_owner.clone();
        let id = self.register_animal(name, species.clone(), 0, owner);
        self.admit_animal(&id, Diagnosis::emergency(condition, species))?;
        Ok(id)
    }

    /// Fee for a case under this clinic's fee schedule.
    pub fn calculate_fee(&self, case: &CaseRecord) -> f64 {
        self.fees.calculate(case)
    }

    // =========================================================================
    // Staff
    // =========================================================================

    pub fn add_staff_member(
        &mut self,
        name: String,
        position: String,
        qualifications: Vec<String>,
    ) -> String {
        self.staff
            .enroll(name, position, qualifications, self.entropy.as_mut())
    }

    pub fn staff(&self) -> &[StaffMember] {
        self.staff.members()
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Add stock; `item == "food"` restocks food.
    pub fn restock_inventory(&mut self, species: &str, item: &str, quantity: u64) {
        self.inventory.restock(species, item, quantity);
        info!(species, item, quantity, "inventory restocked");
    }

    pub fn inventory_entry(&self, species: &str) -> Option<&InventoryEntry> {
        self.inventory.entry(species)
    }

    // =========================================================================
    // Billing & reporting
    // =========================================================================

    pub fn financial_records(&self) -> &[FinancialRecord] {
        &self.financial_records
    }

    /// Report for a zero-based month (0 = January).
    pub fn generate_monthly_report(&self, month: u32, year: i32) -> MonthlyReport {
        report::monthly_report(self.appointments(), &self.financial_records, month, year)
    }

    /// Snapshot of the financial ledger for export.
    pub fn export_billing(&self) -> LedgerExport {
        LedgerExport::from_records(&self.financial_records, &self.animals, self.clock.now())
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::entropy::SequentialEntropy;

    fn noon() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 4, 15)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn clinic() -> Clinic {
        Clinic::new(
            ClinicConfig::default(),
            Box::new(SequentialEntropy::new()),
            Box::new(FixedClock::new(noon())),
        )
    }

    #[test]
    fn test_seed_loads_startup_data() {
        let mut clinic = clinic();
        let ids = clinic.seed(&SeedData::default());

        assert_eq!(ids.animals.len(), 2);
        assert_eq!(ids.staff.len(), 2);
        assert_eq!(clinic.inventory_entry("cat").unwrap().food_stock, 100);
        assert_eq!(clinic.inventory_entry("cat").unwrap().count, 1);
        assert_eq!(clinic.inventory_entry("dog").unwrap().medicine("painkiller"), 30);
    }

    #[test]
    fn test_unknown_animal_is_not_found() {
        let mut clinic = clinic();
        let missing = "anim_missing".to_string();
        let expected = ClinicError::AnimalNotFound(missing.clone());

        assert_eq!(
            clinic.schedule_appointment(&missing, noon(), "vaccine").unwrap_err(),
            expected
        );
        assert_eq!(
            clinic
                .admit_animal(&missing, Diagnosis::new("fever", "cat"))
                .unwrap_err(),
            expected
        );
        assert_eq!(
            clinic.discharge_animal(&missing, "ok".into()).unwrap_err(),
            expected
        );
        assert!(clinic.animal_status(&missing).is_none());
    }

    #[test]
    fn test_status_reports_latest_procedure() {
        let mut clinic = clinic();
        clinic.seed(&SeedData::default());
        let fluffy = clinic.animals()[0].id.clone();

        let status = clinic.animal_status(&fluffy).unwrap();
        assert_eq!(status.status, HealthStatus::Healthy);
        assert!(status.last_procedure.is_none());

        clinic.schedule_appointment(&fluffy, noon(), "vaccine").unwrap();
        let later = noon() + chrono::Duration::days(3);
        clinic.schedule_appointment(&fluffy, later, "dental").unwrap();

        let status = clinic.animal_status(&fluffy).unwrap();
        assert_eq!(status.last_procedure.unwrap().procedure, "dental");
    }

    #[test]
    fn test_discharge_records_payment_with_configured_method() {
        let mut config = ClinicConfig::default();
        config.billing.payment_method = "cash".into();
        let mut clinic = Clinic::new(
            config,
            Box::new(SequentialEntropy::new()),
            Box::new(FixedClock::new(noon())),
        );
        let id = clinic.register_animal("Rex".into(), "dog".into(), 5, "Jane Smith".into());
        clinic
            .admit_animal(&id, Diagnosis::new("injury", "dog"))
            .unwrap();
        clinic.add_treatment(&id, "x-ray".into(), Some(40.0)).unwrap();
        clinic.add_treatment(&id, "bandage".into(), None).unwrap();

        let fee = clinic.discharge_animal(&id, "sprain".into()).unwrap();
        assert_eq!(fee, 90.0);

        let record = &clinic.financial_records()[0];
        assert_eq!(record.amount, 90.0);
        assert_eq!(record.method, "cash");
        assert_eq!(record.date, noon());
        assert!(record.processed);
    }
}
