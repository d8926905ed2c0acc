//! Service layer shared by Accel clients.

mod settings;

pub use settings::{SettingsService, ValidationOutcome};
