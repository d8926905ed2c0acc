//! Settings file location.
//!
//! The settings document lives in a named container directory under the
//! Accel data root: `<data_dir>/accel/settings/settings.json`.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "accel";
const SETTINGS_CONTAINER: &str = "settings";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Platform data root for Accel, if the host has one.
pub fn data_root() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Settings file path under an explicit data root.
pub fn settings_path_in(root: &Path) -> PathBuf {
    root.join(SETTINGS_CONTAINER).join(SETTINGS_FILE_NAME)
}

/// Default settings file path, `None` when no data root can be resolved.
pub fn default_settings_path() -> Option<PathBuf> {
    data_root().map(|root| settings_path_in(&root))
}

/// Resolve the settings path, preferring an explicit override.
pub fn resolve_settings_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    explicit
        .or_else(default_settings_path)
        .ok_or(Error::StoreUnavailable)
}
