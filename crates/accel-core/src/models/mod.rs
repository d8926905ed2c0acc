//! Data models for Accel

mod detection;
mod settings;
mod update;

pub use detection::{Capability, DetectionResult};
pub use settings::{RunMode, Settings};
pub use update::{FieldUpdate, SettingsUpdate};
