//! Clinic configuration and bootstrap seed data.
//!
//! Loaded from JSON. Every field has a default, so `{}` is a valid config.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cases::FeeSchedule;
use crate::scheduler::ReschedulePolicy;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level clinic configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClinicConfig {
    pub billing: BillingConfig,
    pub scheduling: SchedulingConfig,
    /// Owner recorded for animals created by emergency admission
    pub emergency_owner: String,
    /// Sample data loaded at startup
    pub seed: SeedData,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            billing: BillingConfig::default(),
            scheduling: SchedulingConfig::default(),
            emergency_owner: "Emergency Contact".into(),
            seed: SeedData::default(),
        }
    }
}

/// Billing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BillingConfig {
    /// Flat fee charged for every case
    pub base_fee: f64,
    /// Multiplier applied to emergency cases
    pub emergency_multiplier: f64,
    /// Method recorded on financial records
    pub payment_method: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            base_fee: 50.0,
            emergency_multiplier: 1.5,
            payment_method: "credit".into(),
        }
    }
}

/// Scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Hours a conflicting request moves forward
    pub reschedule_step_hours: i64,
    /// Forward moves tried before giving up
    pub max_reschedule_attempts: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            reschedule_step_hours: 2,
            max_reschedule_attempts: 12,
        }
    }
}

/// Animal registered at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedAnimal {
    pub name: String,
    pub species: String,
    pub age: u32,
    pub owner: String,
}

/// Staff member enrolled at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedStaff {
    pub name: String,
    pub position: String,
    pub qualifications: Vec<String>,
}

/// Stock added at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedStock {
    pub species: String,
    pub item: String,
    pub quantity: u64,
}

/// Startup data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeedData {
    pub animals: Vec<SeedAnimal>,
    pub staff: Vec<SeedStaff>,
    pub stock: Vec<SeedStock>,
}

impl Default for SeedData {
    fn default() -> Self {
        let animal = |name: &str, species: &str, age: u32, owner: &str| SeedAnimal {
            name: name.into(),
            species: species.into(),
            age,
            owner: owner.into(),
        };
        let stock = |species: &str, item: &str, quantity: u64| SeedStock {
            species: species.into(),
            item: item.into(),
            quantity,
        };

        Self {
            animals: vec![
                animal("Fluffy", "cat", 3, "John Doe"),
                animal("Rex", "dog", 5, "Jane Smith"),
            ],
            staff: vec![
                SeedStaff {
                    name: "Dr. Smith".into(),
                    position: "vet".into(),
                    qualifications: vec!["general".into(), "surgical".into()],
                },
                SeedStaff {
                    name: "Nurse Johnson".into(),
                    position: "nurse".into(),
                    qualifications: vec!["general".into()],
                },
            ],
            stock: vec![
                stock("cat", "food", 100),
                stock("dog", "food", 150),
                stock("cat", "antibiotic", 50),
                stock("dog", "painkiller", 30),
            ],
        }
    }
}

impl ClinicConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: ClinicConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject values the clinic cannot operate with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.billing.base_fee.is_nan() || self.billing.base_fee < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "billing.base_fee must be non-negative, got {}",
                self.billing.base_fee
            )));
        }
        if self.billing.emergency_multiplier.is_nan() || self.billing.emergency_multiplier <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "billing.emergency_multiplier must be positive, got {}",
                self.billing.emergency_multiplier
            )));
        }
        if self.scheduling.reschedule_step_hours <= 0 {
            return Err(ConfigError::Invalid(format!(
                "scheduling.reschedule_step_hours must be positive, got {}",
                self.scheduling.reschedule_step_hours
            )));
        }
        if Duration::try_hours(self.scheduling.reschedule_step_hours).is_none() {
            return Err(ConfigError::Invalid(format!(
                "scheduling.reschedule_step_hours is out of range, got {}",
                self.scheduling.reschedule_step_hours
            )));
        }
        Ok(())
    }

    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule {
            base_fee: self.billing.base_fee,
            emergency_multiplier: self.billing.emergency_multiplier,
        }
    }

    /// Scheduling policy. An unrepresentable step saturates, so every hop overflows.
    pub fn reschedule_policy(&self) -> ReschedulePolicy {
        ReschedulePolicy {
            step: Duration::try_hours(self.scheduling.reschedule_step_hours)
                .unwrap_or(Duration::MAX),
            max_attempts: self.scheduling.max_reschedule_attempts,
        }
    }
}
