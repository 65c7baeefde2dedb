//! Domain models for the vet clinic.

mod animal;
mod appointment;
mod case_record;
mod financial;
mod inventory;
mod staff;

pub use animal::*;
pub use appointment::*;
pub use case_record::*;
pub use financial::*;
pub use inventory::*;
pub use staff::*;
