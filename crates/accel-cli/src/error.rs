use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] accel_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No settings to update. Pass at least one of --run-mode, --notify, --gpus-in-use, --vulkan")]
    EmptyUpdate,
    #[error("Settings validation was cancelled before it completed")]
    ValidationCancelled,
    #[error(
        "No settings location available. Pass --settings-path or set ACCEL_SETTINGS_PATH."
    )]
    NoSettingsPath,
}
