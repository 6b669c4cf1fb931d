//! Configuration types for a studio.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files of a studio configuration directory.

use serde::Deserialize;

use crate::models::{Employee, OrganizationSettings, OvertimeSettings, PayPeriodPolicy};

/// Contents of `organization.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationProfile {
    /// Organisation identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The pay period policy.
    pub pay_period_settings: PayPeriodPolicy,
    /// Overtime rules; defaults apply when absent.
    #[serde(default)]
    pub overtime_settings: OvertimeSettings,
}

impl OrganizationProfile {
    /// The settings object consumed by the engine.
    pub fn settings(&self) -> OrganizationSettings {
        OrganizationSettings {
            pay_period_settings: self.pay_period_settings.clone(),
            overtime_settings: self.overtime_settings.clone(),
        }
    }
}

/// Contents of `roster.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Every roster member, active or not.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// A fully loaded studio configuration.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    organization: OrganizationProfile,
    roster: Vec<Employee>,
}

impl StudioConfig {
    /// Creates a configuration from its parts.
    pub fn new(organization: OrganizationProfile, roster: Vec<Employee>) -> Self {
        Self {
            organization,
            roster,
        }
    }

    /// The organisation profile.
    pub fn organization(&self) -> &OrganizationProfile {
        &self.organization
    }

    /// The roster.
    pub fn roster(&self) -> &[Employee] {
        &self.roster
    }
}
