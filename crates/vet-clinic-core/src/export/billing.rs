//! Billing export of the financial ledger.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{Animal, FinancialRecord};

/// One billed discharge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerLine {
    /// Payment date
    pub date: NaiveDateTime,
    /// Animal ID
    pub animal_id: String,
    /// Animal name (empty if the animal is unknown)
    pub animal_name: String,
    /// Amount charged
    pub amount: f64,
    /// Payment method
    pub method: String,
    /// Processed flag
    pub processed: bool,
}

/// Snapshot of the financial ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerExport {
    /// Unique export ID
    pub export_id: String,
    /// Export timestamp
    pub exported_at: NaiveDateTime,
    /// Ledger lines in record order
    pub lines: Vec<LedgerLine>,
    /// Sum of all amounts
    pub total: f64,
}

impl LedgerExport {
    /// Build an export, resolving animal names from `animals`.
    pub fn from_records(
        records: &[FinancialRecord],
        animals: &[Animal],
        exported_at: NaiveDateTime,
    ) -> Self {
        let lines: Vec<LedgerLine> = records
            .iter()
            .map(|record| LedgerLine {
                date: record.date,
                animal_id: record.animal_id.clone(),
                animal_name: animals
                    .iter()
                    .find(|a| a.id == record.animal_id)
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                amount: record.amount,
                method: record.method.clone(),
                processed: record.processed,
            })
            .collect();
        let total: f64 = lines.iter().map(|l| l.amount).sum();

        Self {
            export_id: uuid::Uuid::new_v4().to_string(),
            exported_at,
            lines,
            total,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("export_id,date,animal_id,animal_name,amount,method,processed\n");

        for line in &self.lines {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&self.export_id),
                line.date.format("%Y-%m-%d %H:%M:%S"),
                escape_csv(&line.animal_id),
                escape_csv(&line.animal_name),
                line.amount,
                escape_csv(&line.method),
                line.processed,
            ));
        }

        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(day: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 7, day)
            .and_then(|d| d.and_hms_opt(15, 30, 0))
            .unwrap()
    }

    fn make_ledger() -> (Vec<FinancialRecord>, Vec<Animal>) {
        let animals = vec![Animal::new(
            "anim_1".into(),
            "Biscuit, Jr.".into(),
            "dog".into(),
            2,
            "Sam".into(),
        )];
        let records = vec![
            FinancialRecord {
                date: on(1),
                animal_id: "anim_1".into(),
                amount: 50.0,
                method: "credit".into(),
                processed: true,
            },
            FinancialRecord {
                date: on(2),
                animal_id: "anim_gone".into(),
                amount: 112.5,
                method: "credit".into(),
                processed: true,
            },
        ];
        (records, animals)
    }

    #[test]
    fn test_ledger_export_from_records() {
        let (records, animals) = make_ledger();
        let export = LedgerExport::from_records(&records, &animals, on(3));

        assert_eq!(export.lines.len(), 2);
        assert_eq!(export.lines[0].animal_name, "Biscuit, Jr.");
        assert_eq!(export.lines[1].animal_name, "");
        assert_eq!(export.total, 162.5);
        assert_eq!(export.export_id.len(), 36); // UUID format
    }

    #[test]
    fn test_ledger_export_json() {
        let (records, animals) = make_ledger();
        let json = LedgerExport::from_records(&records, &animals, on(3))
            .to_json()
            .unwrap();
        assert!(json.contains("anim_gone"));
        assert!(json.contains("112.5"));
    }

    #[test]
    fn test_ledger_export_csv() {
        let (records, animals) = make_ledger();
        let csv = LedgerExport::from_records(&records, &animals, on(3)).to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3); // Header + 2 records
        assert!(lines[0].starts_with("export_id,"));
        assert!(lines[1].contains("\"Biscuit, Jr.\""));
        assert!(lines[1].contains("2024-07-01 15:30:00"));
        assert!(lines[2].contains("112.5"));
    }

    #[test]
    fn test_empty_ledger() {
        let export = LedgerExport::from_records(&[], &[], on(3));
        assert!(export.lines.is_empty());
        assert_eq!(export.total, 0.0);
        assert_eq!(export.to_csv().lines().count(), 1);
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }
}
