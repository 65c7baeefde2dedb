//! Appointment models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Appointment status. Cancellation and completion are not modeled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
}

/// A scheduled appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Unique ID (`apt_...`)
    pub id: String,
    /// Animal this appointment is for (reference only)
    pub animal_id: String,
    /// Date and time
    pub date: NaiveDateTime,
    /// Procedure name (e.g., "vaccine", "surgery")
    pub procedure: String,
    /// Assigned staff; `None` when nobody is qualified
    pub staff_id: Option<String>,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Whether a request for `date` with `staff_id` collides with this appointment.
    ///
    /// Two unassigned appointments on the same date conflict.
    pub fn conflicts_with(&self, date: NaiveDateTime, staff_id: Option<&str>) -> bool {
        self.date == date && self.staff_id.as_deref() == staff_id
    }
}
