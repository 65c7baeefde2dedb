//! Case lifecycle: admit → treat → discharge.
//!
//! Each animal has at most one open case. Discharged animals can be admitted
//! again, which opens a fresh case.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::error::{ClinicError, ClinicResult};
use crate::inventory::{medications_for, InventoryLedger};
use crate::models::{Animal, CaseRecord, ConsumeOutcome, Diagnosis, TreatmentLineItem};

/// Fee rules applied at discharge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeSchedule {
    /// Flat charge for every case
    pub base_fee: f64,
    /// Multiplier applied to emergency cases
    pub emergency_multiplier: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            base_fee: 50.0,
            emergency_multiplier: 1.5,
        }
    }
}

impl FeeSchedule {
    /// `(base + treatment costs) × multiplier-if-emergency`. Pure.
    pub fn calculate(&self, case: &CaseRecord) -> f64 {
        let subtotal = self.base_fee + case.treatment_total();
        if case.is_emergency() {
            subtotal * self.emergency_multiplier
        } else {
            subtotal
        }
    }
}

/// Stock drawn for one indicated medicine at admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineUsage {
    pub medicine: &'static str,
    pub outcome: ConsumeOutcome,
}

/// Open a case and draw one unit of each medicine indicated by the condition.
///
/// Stock comes from the diagnosis's species, which may differ from the animal's.
pub fn admit(
    animal: &mut Animal,
    diagnosis: Diagnosis,
    date: NaiveDateTime,
    inventory: &mut InventoryLedger,
) -> ClinicResult<Vec<MedicineUsage>> {
    if animal.is_hospitalized() {
        return Err(ClinicError::CaseAlreadyOpen(animal.id.clone()));
    }

    let usage: Vec<MedicineUsage> = medications_for(&diagnosis.condition)
        .iter()
        .map(|&medicine| MedicineUsage {
            medicine,
            outcome: inventory.consume(&diagnosis.species, medicine),
        })
        .collect();

    if usage.is_empty() {
        debug!(condition = %diagnosis.condition, "no medication indicated");
    }

    info!(
        animal_id = %animal.id,
        condition = %diagnosis.condition,
        emergency = diagnosis.emergency,
        "animal admitted"
    );
    animal.medical_history.push(CaseRecord::open(date, diagnosis));
    Ok(usage)
}

/// Append a treatment line item to the open case.
pub fn add_treatment(animal: &mut Animal, item: TreatmentLineItem) -> ClinicResult<()> {
    if let Some(cost) = item.cost {
        if !cost.is_finite() || cost < 0.0 {
            return Err(ClinicError::InvalidTreatmentCost(cost));
        }
    }
    let animal_id = animal.id.clone();
    let case = animal
        .open_case_mut()
        .ok_or(ClinicError::NoActiveCase(animal_id))?;
    case.treatment.push(item);
    Ok(())
}

/// Close the open case and return it with the fee owed.
pub fn discharge<'a>(
    animal: &'a mut Animal,
    final_diagnosis: String,
    fees: &FeeSchedule,
) -> ClinicResult<(&'a CaseRecord, f64)> {
    let animal_id = animal.id.clone();
    let case = animal
        .open_case_mut()
        .ok_or_else(|| ClinicError::NoActiveCase(animal_id.clone()))?;

    case.discharged = true;
    case.final_diagnosis = Some(final_diagnosis);
    let fee = fees.calculate(case);

    info!(animal_id = %animal_id, fee, "animal discharged");
    Ok((case, fee))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn admitted_on() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 2, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap()
    }

    fn fluffy() -> Animal {
        Animal::new(
            "anim_fluffy".into(),
            "Fluffy".into(),
            "cat".into(),
            3,
            "John Doe".into(),
        )
    }

    #[test]
    fn test_admit_consumes_indicated_medicine() {
        let mut inventory = InventoryLedger::new();
        inventory.restock("cat", "antibiotic", 50);
        let mut animal = fluffy();

        let usage = admit(
            &mut animal,
            Diagnosis::new("fever", "cat"),
            admitted_on(),
            &mut inventory,
        )
        .unwrap();

        assert_eq!(
            usage,
            vec![
                MedicineUsage {
                    medicine: "antipyretic",
                    outcome: ConsumeOutcome::UnknownMedicine
                },
                MedicineUsage {
                    medicine: "antibiotic",
                    outcome: ConsumeOutcome::Consumed { remaining: 49 }
                },
            ]
        );
        assert_eq!(animal.medical_history.len(), 1);
        assert!(animal.is_hospitalized());
    }

    #[test]
    fn test_admit_rejects_second_open_case() {
        let mut inventory = InventoryLedger::new();
        let mut animal = fluffy();
        admit(&mut animal, Diagnosis::new("allergy", "cat"), admitted_on(), &mut inventory).unwrap();

        let err = admit(&mut animal, Diagnosis::new("fever", "cat"), admitted_on(), &mut inventory)
            .unwrap_err();
        assert_eq!(err, ClinicError::CaseAlreadyOpen("anim_fluffy".into()));
        assert_eq!(animal.medical_history.len(), 1);
    }

    #[test]
    fn test_unknown_condition_consumes_nothing() {
        let mut inventory = InventoryLedger::new();
        inventory.restock("cat", "antibiotic", 2);
        let mut animal = fluffy();
        let usage = admit(
            &mut animal,
            Diagnosis::new("hiccups", "cat"),
            admitted_on(),
            &mut inventory,
        )
        .unwrap();
        assert!(usage.is_empty());
        assert_eq!(inventory.entry("cat").unwrap().medicine("antibiotic"), 2);
    }

    #[test]
    fn test_discharge_and_readmit() {
        let mut inventory = InventoryLedger::new();
        let mut animal = fluffy();
        let fees = FeeSchedule::default();

        admit(&mut animal, Diagnosis::new("fever", "cat"), admitted_on(), &mut inventory).unwrap();
        add_treatment(
            &mut animal,
            TreatmentLineItem {
                description: "fluids".into(),
                cost: Some(25.0),
            },
        )
        .unwrap();

        let (case, fee) = discharge(&mut animal, "recovered".into(), &fees).unwrap();
        assert!(case.discharged);
        assert_eq!(case.final_diagnosis.as_deref(), Some("recovered"));
        assert_eq!(fee, 75.0);

        assert_eq!(
            discharge(&mut animal, "again".into(), &fees).unwrap_err(),
            ClinicError::NoActiveCase("anim_fluffy".into())
        );

        admit(&mut animal, Diagnosis::new("injury", "cat"), admitted_on(), &mut inventory).unwrap();
        assert_eq!(animal.medical_history.len(), 2);
        assert!(animal.is_hospitalized());
    }

    #[test]
    fn test_add_treatment_requires_open_case() {
        let mut animal = fluffy();
        let err = add_treatment(
            &mut animal,
            TreatmentLineItem {
                description: "nail trim".into(),
                cost: Some(10.0),
            },
        )
        .unwrap_err();
        assert_eq!(err, ClinicError::NoActiveCase("anim_fluffy".into()));
    }

    #[test]
    fn test_add_treatment_rejects_negative_and_nan_costs() {
        let mut inventory = InventoryLedger::new();
        let mut animal = fluffy();
        admit(&mut animal, Diagnosis::new("fever", "cat"), admitted_on(), &mut inventory).unwrap();

        for cost in [-500.0, f64::NAN, f64::INFINITY] {
            let err = add_treatment(
                &mut animal,
                TreatmentLineItem {
                    description: "refund".into(),
                    cost: Some(cost),
                },
            )
            .unwrap_err();
            assert!(matches!(err, ClinicError::InvalidTreatmentCost(_)));
        }

        let (case, fee) = discharge(&mut animal, "flu".into(), &FeeSchedule::default()).unwrap();
        assert!(case.treatment.is_empty());
        assert_eq!(fee, 50.0);
    }

    #[test]
    fn test_emergency_fee_multiplier() {
        let fees = FeeSchedule::default();
        let mut case = CaseRecord::open(admitted_on(), Diagnosis::emergency("injury", "dog"));
        assert_eq!(fees.calculate(&case), 75.0);

        case.treatment.push(TreatmentLineItem {
            description: "stitches".into(),
            cost: Some(30.0),
        });
        assert_eq!(fees.calculate(&case), 120.0);
    }

    proptest! {
        #[test]
        fn prop_fee_is_deterministic(
            costs in proptest::collection::vec(proptest::option::of(0.0f64..500.0), 0..8),
            emergency in any::<bool>(),
        ) {
            let fees = FeeSchedule::default();
            let mut case = CaseRecord::open(admitted_on(), Diagnosis::new("fever", "cat"));
            case.diagnosis.emergency = emergency;
            case.treatment = costs
                .into_iter()
                .map(|cost| TreatmentLineItem { description: "item".into(), cost })
                .collect();
            case.discharged = true;

            let first = fees.calculate(&case);
            prop_assert_eq!(first, fees.calculate(&case));
            prop_assert!(first >= fees.base_fee);
        }
    }
}
