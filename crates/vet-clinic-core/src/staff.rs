//! Staff roster and procedure-based assignment.

use tracing::{info, warn};

use crate::entropy::Entropy;
use crate::ids::{new_id, STAFF_PREFIX};
use crate::models::{ProcedureCategory, StaffMember};

/// Roster of staff members, in enrollment order.
#[derive(Debug, Clone, Default)]
pub struct StaffDirectory {
    members: Vec<StaffMember>,
}

impl StaffDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a staff member and return their ID.
    pub fn enroll(
        &mut self,
        name: String,
        position: String,
        qualifications: Vec<String>,
        entropy: &mut dyn Entropy,
    ) -> String {
        let id = new_id(STAFF_PREFIX, entropy);
        info!(staff_id = %id, %name, %position, "staff enrolled");
        self.members.push(StaffMember {
            id: id.clone(),
            name,
            position,
            qualifications,
        });
        id
    }

    /// IDs of every member holding the category's qualification tag.
    pub fn qualified_for(&self, category: ProcedureCategory) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| m.is_qualified_for(category))
            .map(|m| m.id.as_str())
            .collect()
    }

    /// Pick a qualified member at random for `procedure`.
    ///
    /// Returns `None` when nobody is qualified. There is no load balancing
    /// or availability check.
    pub fn assign(&self, procedure: &str, entropy: &mut dyn Entropy) -> Option<String> {
        let category = classify(procedure);
        let picked = pick_random(&self.qualified_for(category), entropy).map(str::to_string);
        if picked.is_none() {
            warn!(procedure, %category, "no qualified staff, leaving unassigned");
        }
        picked
    }

    pub fn members(&self) -> &[StaffMember] {
        &self.members
    }
}

/// Map a procedure name to its category.
pub fn classify(procedure: &str) -> ProcedureCategory {
    match procedure {
        "vaccine" | "checkup" => ProcedureCategory::General,
        "surgery" | "dental" => ProcedureCategory::Surgical,
        _ => ProcedureCategory::Specialized,
    }
}

/// Uniform choice from `ids`; `None` if empty.
pub fn pick_random<'a>(ids: &[&'a str], entropy: &mut dyn Entropy) -> Option<&'a str> {
    if ids.is_empty() {
        return None;
    }
    Some(ids[entropy.pick(ids.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{RngEntropy, SequentialEntropy};

    fn roster(entropy: &mut dyn Entropy) -> StaffDirectory {
        let mut staff = StaffDirectory::new();
        staff.enroll(
            "Dr. Smith".into(),
            "vet".into(),
            vec!["general".into(), "surgical".into()],
            entropy,
        );
        staff.enroll(
            "Nurse Johnson".into(),
            "nurse".into(),
            vec!["general".into()],
            entropy,
        );
        staff
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("vaccine"), ProcedureCategory::General);
        assert_eq!(classify("checkup"), ProcedureCategory::General);
        assert_eq!(classify("surgery"), ProcedureCategory::Surgical);
        assert_eq!(classify("dental"), ProcedureCategory::Surgical);
        assert_eq!(classify("ultrasound"), ProcedureCategory::Specialized);
        // Exact keyword match only
        assert_eq!(classify("Vaccine"), ProcedureCategory::Specialized);
    }

    #[test]
    fn test_qualified_for() {
        let mut entropy = SequentialEntropy::new();
        let staff = roster(&mut entropy);
        assert_eq!(staff.qualified_for(ProcedureCategory::General).len(), 2);
        assert_eq!(staff.qualified_for(ProcedureCategory::Surgical).len(), 1);
        assert!(staff.qualified_for(ProcedureCategory::Specialized).is_empty());
    }

    #[test]
    fn test_assign_unqualified_is_none() {
        let mut entropy = SequentialEntropy::new();
        let staff = roster(&mut entropy);
        assert_eq!(staff.assign("mri", &mut entropy), None);
    }

    #[test]
    fn test_assign_picks_a_qualified_member() {
        let mut entropy = RngEntropy::seeded(5);
        let staff = roster(&mut entropy);
        let surgeon = staff.members()[0].id.clone();
        for _ in 0..20 {
            assert_eq!(staff.assign("surgery", &mut entropy), Some(surgeon.clone()));
        }
    }

    #[test]
    fn test_pick_random_empty() {
        let mut entropy = SequentialEntropy::new();
        assert_eq!(pick_random(&[], &mut entropy), None);
        assert_eq!(pick_random(&["a", "b"], &mut entropy), Some("a"));
    }
}
