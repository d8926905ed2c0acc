//! accel-core - Core library for Accel
//!
//! This crate holds the settings document model, the run mode and
//! notification resolution rules, and the storage layer used by every Accel
//! front end.

pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

pub use error::{Error, Result};
pub use models::{Capability, DetectionResult, FieldUpdate, RunMode, Settings, SettingsUpdate};
pub use services::{SettingsService, ValidationOutcome};
pub use state::NotificationState;
pub use store::{JsonFileSettingsStore, MemorySettingsStore, SettingsStore};
pub use validation::{ValidationHandle, ValidationScheduler, DEFAULT_VALIDATION_DELAY};
