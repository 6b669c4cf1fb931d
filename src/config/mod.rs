//! Configuration loading for a studio.
//!
//! This module loads a studio's organisation settings (pay period policy and
//! overtime rules) and roster from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use studio_payroll::config::SettingsLoader;
//!
//! let config = SettingsLoader::load("./config/demo-studio").unwrap();
//! println!("Loaded studio: {}", config.organization().name);
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{OrganizationProfile, RosterConfig, StudioConfig};
