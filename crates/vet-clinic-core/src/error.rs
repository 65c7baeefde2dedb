//! Clinic operation errors.

use thiserror::Error;

/// Failures surfaced by clinic facade operations.
///
/// None of these are fatal; front ends turn them into a user-visible message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClinicError {
    #[error("Animal not found: {0}")]
    AnimalNotFound(String),

    #[error("No active case for animal: {0}")]
    NoActiveCase(String),

    #[error("Animal already has an open case: {0}")]
    CaseAlreadyOpen(String),

    #[error("Treatment cost must be a non-negative number, got {0}")]
    InvalidTreatmentCost(f64),

    #[error("Could not schedule {procedure} after {attempts} reschedule attempts")]
    SchedulingExhausted { procedure: String, attempts: u32 },
}

pub type ClinicResult<T> = Result<T, ClinicError>;
