//! Animal models.

use serde::{Deserialize, Serialize};

use super::case_record::CaseRecord;

/// A registered animal. Never deleted once registered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Animal {
    /// Unique, immutable ID (`anim_...`)
    pub id: String,
    /// Animal name
    pub name: String,
    /// Species (e.g., "cat", "dog")
    pub species: String,
    /// Age in years
    pub age: u32,
    /// Owner/client name
    pub owner: String,
    /// Medical history, oldest case first
    pub medical_history: Vec<CaseRecord>,
}

impl Animal {
    /// Create a new animal with an empty medical history.
    pub fn new(id: String, name: String, species: String, age: u32, owner: String) -> Self {
        Self {
            id,
            name,
            species,
            age,
            owner,
            medical_history: Vec::new(),
        }
    }

    /// The open (undischarged) case, if any.
    pub fn open_case(&self) -> Option<&CaseRecord> {
        self.medical_history.iter().find(|c| !c.discharged)
    }

    /// Mutable access to the open case, if any.
    pub fn open_case_mut(&mut self) -> Option<&mut CaseRecord> {
        self.medical_history.iter_mut().find(|c| !c.discharged)
    }

    /// Whether the animal is currently hospitalized.
    pub fn is_hospitalized(&self) -> bool {
        self.open_case().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Diagnosis;

    #[test]
    fn test_new_animal() {
        let animal = Animal::new(
            "anim_1".into(),
            "Fluffy".into(),
            "cat".into(),
            3,
            "John Doe".into(),
        );
        assert_eq!(animal.name, "Fluffy");
        assert!(animal.medical_history.is_empty());
        assert!(!animal.is_hospitalized());
    }

    #[test]
    fn test_open_case_skips_discharged() {
        let mut animal = Animal::new("anim_1".into(), "Rex".into(), "dog".into(), 5, "Jane".into());
        let opened = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap();

        let mut closed = CaseRecord::open(opened, Diagnosis::new("fever", "dog"));
        closed.discharged = true;
        animal.medical_history.push(closed);
        assert!(animal.open_case().is_none());

        animal
            .medical_history
            .push(CaseRecord::open(opened, Diagnosis::new("injury", "dog")));
        assert_eq!(animal.open_case().unwrap().diagnosis.condition, "injury");
        assert!(animal.is_hospitalized());
    }
}
