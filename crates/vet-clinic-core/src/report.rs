//! Monthly activity and revenue report.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Appointment, FinancialRecord};

/// How many procedures the report ranks.
pub const TOP_PROCEDURES: usize = 3;

/// A procedure and how often it appeared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcedureCount {
    pub procedure: String,
    pub count: usize,
}

/// Activity for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyReport {
    /// Appointments dated in the month
    pub total_appointments: usize,
    /// Sum of financial records dated in the month
    pub revenue: f64,
    /// Distinct animals among the month's appointments
    pub animals_treated: usize,
    /// Most frequent procedures, most common first
    pub common_procedures: Vec<ProcedureCount>,
}

/// Build the report for a zero-based `month` (0 = January) and `year`.
///
/// An out-of-range month matches nothing.
pub fn monthly_report(
    appointments: &[Appointment],
    financial_records: &[FinancialRecord],
    month: u32,
    year: i32,
) -> MonthlyReport {
    let in_month = |date: &NaiveDateTime| date.month0() == month && date.year() == year;

    let monthly: Vec<&Appointment> = appointments.iter().filter(|a| in_month(&a.date)).collect();

    let revenue: f64 = financial_records
        .iter()
        .filter(|r| in_month(&r.date))
        .map(|r| r.amount)
        .sum();

    let animals_treated = monthly
        .iter()
        .map(|a| a.animal_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    MonthlyReport {
        total_appointments: monthly.len(),
        revenue,
        animals_treated,
        common_procedures: most_common(monthly.iter().map(|a| a.procedure.as_str()), TOP_PROCEDURES),
    }
}

/// Top `n` items by frequency. Ties keep first-seen order.
pub fn most_common<'a>(items: impl Iterator<Item = &'a str>, n: usize) -> Vec<ProcedureCount> {
    let mut counts: Vec<ProcedureCount> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|c| c.procedure == item) {
            Some(entry) => entry.count += 1,
            None => counts.push(ProcedureCount {
                procedure: item.to_string(),
                count: 1,
            }),
        }
    }
    // Stable sort preserves insertion order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}
