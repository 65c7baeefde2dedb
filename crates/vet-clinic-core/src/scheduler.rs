//! Appointment scheduling with staff/time conflict resolution.
//!
//! A request conflicts with a stored appointment when both share the exact
//! date and the same assigned staff ID (unassigned counts as the same ID).
//! Conflicts roll the request forward by a fixed step until a free slot is
//! found or the attempt budget runs out.

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::entropy::Entropy;
use crate::error::{ClinicError, ClinicResult};
use crate::ids::{new_id, APPOINTMENT_PREFIX};
use crate::models::{Appointment, AppointmentStatus};
use crate::staff::StaffDirectory;

/// Reschedule policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReschedulePolicy {
    /// How far a conflicting request moves forward
    pub step: Duration,
    /// Maximum number of forward moves before giving up
    pub max_attempts: u32,
}

impl Default for ReschedulePolicy {
    fn default() -> Self {
        Self {
            step: Duration::hours(2),
            max_attempts: 12,
        }
    }
}

/// Owns all appointments, in creation order.
#[derive(Debug, Clone, Default)]
pub struct AppointmentScheduler {
    appointments: Vec<Appointment>,
    policy: ReschedulePolicy,
}

impl AppointmentScheduler {
    pub fn new(policy: ReschedulePolicy) -> Self {
        Self {
            appointments: Vec::new(),
            policy,
        }
    }

    /// Schedule `procedure` for `animal_id` at `date` or the first free later slot.
    ///
    /// The caller has already checked that the animal exists. Staff is
    /// re-picked on every attempt.
    pub fn schedule(
        &mut self,
        animal_id: &str,
        date: NaiveDateTime,
        procedure: &str,
        staff: &StaffDirectory,
        entropy: &mut dyn Entropy,
    ) -> ClinicResult<String> {
        let mut slot = date;
        let mut attempt = 0;

        loop {
            let staff_id = staff.assign(procedure, entropy);

            if !self.has_conflict(slot, staff_id.as_deref()) {
                let id = new_id(APPOINTMENT_PREFIX, entropy);
                info!(
                    appointment_id = %id,
                    animal_id,
                    procedure,
                    date = %slot,
                    staff_id = staff_id.as_deref().unwrap_or("-"),
                    "appointment scheduled"
                );
                self.appointments.push(Appointment {
                    id: id.clone(),
                    animal_id: animal_id.to_string(),
                    date: slot,
                    procedure: procedure.to_string(),
                    staff_id,
                    status: AppointmentStatus::Scheduled,
                });
                return Ok(id);
            }

            if attempt == self.policy.max_attempts {
                break;
            }
            // A slot past the calendar's range ends the search
            let Some(next) = slot.checked_add_signed(self.policy.step) else {
                debug!(animal_id, procedure, %slot, attempt, "no later slot representable");
                break;
            };
            debug!(
                animal_id,
                procedure,
                %slot,
                attempt,
                "slot taken, rolling forward"
            );
            slot = next;
            attempt += 1;
        }

        warn!(
            animal_id,
            procedure,
            requested = %date,
            attempts = attempt,
            "scheduling exhausted"
        );
        Err(ClinicError::SchedulingExhausted {
            procedure: procedure.to_string(),
            attempts: attempt,
        })
    }

    /// Whether any stored appointment collides with `date`/`staff_id`.
    pub fn has_conflict(&self, date: NaiveDateTime, staff_id: Option<&str>) -> bool {
        self.appointments
            .iter()
            .any(|a| a.conflicts_with(date, staff_id))
    }

    /// Appointments referencing an animal, in creation order.
    pub fn for_animal<'a>(
        &'a self,
        animal_id: &'a str,
    ) -> impl Iterator<Item = &'a Appointment> + 'a {
        self.appointments
            .iter()
            .filter(move |a| a.animal_id == animal_id)
    }

    /// Latest-dated appointment for an animal. On equal dates the earlier-created one wins.
    pub fn last_for_animal(&self, animal_id: &str) -> Option<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.animal_id == animal_id)
            .fold(None, |latest, current| match latest {
                Some(l) if current.date <= l.date => Some(l),
                _ => Some(current),
            })
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }
}
