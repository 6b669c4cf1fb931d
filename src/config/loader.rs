//! Configuration loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading a studio's
//! organisation settings and roster from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, OrganizationSettings, OvertimeSettings, PayPeriodPolicy};

use super::types::{OrganizationProfile, RosterConfig, StudioConfig};

/// Loads and provides access to a studio configuration.
///
/// # Directory Structure
///
/// ```text
/// config/demo-studio/
/// ├── organization.yaml   # Organisation, pay period and overtime settings
/// └── roster.yaml         # Employees and mileage rates
/// ```
///
/// # Example
///
/// ```no_run
/// use studio_payroll::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/demo-studio").unwrap();
/// println!("Loaded studio: {}", loader.organization().name);
/// println!("Pay periods: {}", loader.policy().period_type);
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    config: StudioConfig,
}

impl SettingsLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - either file is missing ([`PayrollError::ConfigNotFound`])
    /// - either file contains invalid YAML or misses a required field
    ///   ([`PayrollError::ConfigParseError`])
    /// - the pay period policy is active but its configuration is invalid
    ///   ([`PayrollError::InvalidPolicy`])
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let organization =
            Self::load_yaml::<OrganizationProfile>(&path.join("organization.yaml"))?;
        let roster = Self::load_yaml::<RosterConfig>(&path.join("roster.yaml"))?;

        let policy = &organization.pay_period_settings;
        if policy.is_active {
            policy.schedule()?;
        }

        info!(
            organization_id = %organization.id,
            period_type = %policy.period_type,
            employees = roster.employees.len(),
            "Loaded studio configuration"
        );

        Ok(Self {
            config: StudioConfig::new(organization, roster.employees),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying studio configuration.
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Returns the organisation profile.
    pub fn organization(&self) -> &OrganizationProfile {
        self.config.organization()
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> OrganizationSettings {
        self.config.organization().settings()
    }

    /// Returns the pay period policy.
    pub fn policy(&self) -> &PayPeriodPolicy {
        &self.config.organization().pay_period_settings
    }

    /// Returns the overtime settings.
    pub fn overtime(&self) -> &OvertimeSettings {
        &self.config.organization().overtime_settings
    }

    /// Returns the roster.
    pub fn roster(&self) -> &[Employee] {
        self.config.roster()
    }
}
