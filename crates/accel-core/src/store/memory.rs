//! In-memory implementation of `SettingsStore`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::SettingsStore;
use crate::error::Result;
use crate::models::Settings;

/// Settings kept in process memory (primarily for tests and embedding).
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    settings: Arc<RwLock<Settings>>,
    saves: Arc<AtomicUsize>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            saves: Arc::default(),
        }
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Settings> {
        Ok(self.settings.read().await.clone())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        *self.settings.write().await = settings.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
