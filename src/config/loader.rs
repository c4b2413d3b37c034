//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the attendance
//! policy from a YAML file.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

/// Name of the policy file inside a configuration directory.
pub const POLICY_FILE: &str = "policy.yaml";

/// Loads and provides access to the attendance policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── policy.yaml   # Shift defaults, penalty tiers, overtime caps
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Absence costs {} day(s)", loader.config().absence_penalty);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads the policy from `policy.yaml` in the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The policy file is missing
    /// - The file contains invalid YAML
    /// - A value fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join(POLICY_FILE);
        let path_str = policy_path.display().to_string();

        let content = fs::read_to_string(&policy_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: EngineConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Self::from_config(config)
    }

    /// Wraps an in-memory policy after validating it.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        validate(&config)?;
        Ok(Self { config })
    }

    /// Returns the loaded policy.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader and returns the policy.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}

fn validate(config: &EngineConfig) -> EngineResult<()> {
    let days = config
        .rest_days
        .iter()
        .chain(config.weekend_days.iter())
        .chain(std::iter::once(&config.shortened_day.day_of_week));
    for day in days {
        if *day > 6 {
            return Err(invalid(
                "days",
                format!("day of week {} is outside 0-6", day),
            ));
        }
    }

    for tier in &config.lateness_tiers {
        if tier.over_minutes < 0 {
            return Err(invalid(
                "lateness_tiers",
                format!("threshold {} must not be negative", tier.over_minutes),
            ));
        }
        if tier.penalty < Decimal::ZERO {
            return Err(invalid(
                "lateness_tiers",
                format!("penalty {} must not be negative", tier.penalty),
            ));
        }
    }

    if config.early_leave.grace_minutes < 0 {
        return Err(invalid("early_leave", "grace must not be negative".to_string()));
    }

    let penalties = [
        ("early_leave", config.early_leave.penalty),
        ("missing_punch_penalty", config.missing_punch_penalty),
        ("absence_penalty", config.absence_penalty),
    ];
    for (field, value) in penalties {
        if value < Decimal::ZERO {
            return Err(invalid(field, format!("penalty {} must not be negative", value)));
        }
    }

    if config.default_max_overnight_hours <= Decimal::ZERO {
        return Err(invalid(
            "default_max_overnight_hours",
            "cap must be positive".to_string(),
        ));
    }

    Ok(())
}

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message,
    }
}
