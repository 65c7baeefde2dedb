//! Staff models.

use serde::{Deserialize, Serialize};

/// Coarse procedure classification used to match staff qualifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureCategory {
    General,
    Surgical,
    Specialized,
}

impl ProcedureCategory {
    /// Qualification tag matching this category.
    pub fn as_tag(&self) -> &'static str {
        match self {
            ProcedureCategory::General => "general",
            ProcedureCategory::Surgical => "surgical",
            ProcedureCategory::Specialized => "specialized",
        }
    }
}

impl std::fmt::Display for ProcedureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A staff member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffMember {
    /// Unique ID (`staff_...`)
    pub id: String,
    pub name: String,
    /// Position (e.g., "vet", "nurse")
    pub position: String,
    /// Free-form qualification tags
    pub qualifications: Vec<String>,
}

impl StaffMember {
    pub fn is_qualified_for(&self, category: ProcedureCategory) -> bool {
        self.qualifications.iter().any(|q| q == category.as_tag())
    }
}
