//! JSON file implementation of `SettingsStore`

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::SettingsStore;
use crate::config;
use crate::error::{Error, Result};
use crate::models::Settings;

/// Settings stored as a single JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the platform default location.
    pub fn open_default() -> Result<Self> {
        config::resolve_settings_path(None).map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn parse(&self, raw: &str) -> Result<Settings> {
        if raw.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_json::from_str(raw).map_err(|source| Error::MalformedSettings {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for JsonFileSettingsStore {
    async fn load(&self) -> Result<Settings> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => self.parse(&raw),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!("No settings at {}, using empty document", self.path.display());
                Ok(Settings::default())
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let serialized = serde_json::to_string_pretty(settings)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, serialized).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
