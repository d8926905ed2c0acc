//! Settings read-modify-write service shared by clients.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::models::{DetectionResult, Settings, SettingsUpdate};
use crate::resolver::{is_gpu_mode_enabled, merge, should_suppress_notification};
use crate::state::NotificationState;
use crate::store::SettingsStore;
use crate::Result;

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    /// Document the decision was made on
    pub settings: Settings,
    /// Detection records the decision was made on
    pub detection: DetectionResult,
    /// Whether the document selects GPU mode
    pub gpu_mode_enabled: bool,
    /// Whether the suppression rule held
    pub suppressed: bool,
    /// Whether this pass actually hid a visible notification
    pub notification_cleared: bool,
}

#[derive(Debug, Default)]
struct GpuModeSnapshot {
    seq: u64,
    enabled: bool,
}

/// Loads, merges and persists the settings document.
///
/// A service without a store behaves as if the store were empty and
/// discards writes. Unreadable settings content is logged and replaced by
/// the empty document.
pub struct SettingsService<S> {
    store: Option<S>,
    notification: NotificationState,
    write_lock: tokio::sync::Mutex<()>,
    load_seq: AtomicU64,
    gpu_mode: Mutex<GpuModeSnapshot>,
}

impl<S: SettingsStore> SettingsService<S> {
    /// Create a service over `store`.
    pub fn new(store: S, notification: NotificationState) -> Self {
        Self::with_optional_store(Some(store), notification)
    }

    /// Create a service with no backing store.
    pub fn unavailable(notification: NotificationState) -> Self {
        Self::with_optional_store(None, notification)
    }

    pub fn with_optional_store(store: Option<S>, notification: NotificationState) -> Self {
        if store.is_none() {
            tracing::info!("Settings store unavailable, running with empty settings");
        }
        Self {
            store,
            notification,
            write_lock: tokio::sync::Mutex::new(()),
            load_seq: AtomicU64::new(0),
            gpu_mode: Mutex::new(GpuModeSnapshot::default()),
        }
    }

    pub const fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub const fn notification(&self) -> &NotificationState {
        &self.notification
    }

    /// GPU mode as of the most recent completed load.
    pub fn is_gpu_mode_enabled(&self) -> bool {
        self.gpu_mode
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .enabled
    }

    /// Load the current document and refresh the GPU mode flag.
    pub async fn load(&self) -> Result<Settings> {
        let seq = self.next_seq();
        let settings = self.load_document().await?;
        self.publish_gpu_mode(seq, &settings);
        Ok(settings)
    }

    /// Apply `update` to the stored document and persist the result.
    pub async fn save_settings(&self, update: &SettingsUpdate) -> Result<Settings> {
        let _guard = self.write_lock.lock().await;

        let current = self.load().await?;
        let next = merge(&current, update);

        match &self.store {
            Some(store) => store.save(&next).await?,
            None => tracing::warn!("Settings store unavailable, discarding settings update"),
        }

        let seq = self.next_seq();
        self.publish_gpu_mode(seq, &next);
        Ok(next)
    }

    /// Re-check the notification against current detection results.
    ///
    /// Uses `detection` when given, otherwise the detection records stored in
    /// the settings document.
    pub async fn validate(&self, detection: Option<&DetectionResult>) -> Result<ValidationOutcome> {
        let settings = self.load().await?;
        let detection = detection
            .cloned()
            .unwrap_or_else(|| settings.stored_detection());

        let suppressed = should_suppress_notification(&settings, &detection);
        let notification_cleared = suppressed && self.notification.clear();
        if notification_cleared {
            tracing::info!(
                "Cleared hardware notification (driver: {:?}, cuda: {:?})",
                detection.driver_present(),
                detection.cuda_present()
            );
        }

        Ok(ValidationOutcome {
            gpu_mode_enabled: is_gpu_mode_enabled(&settings),
            settings,
            detection,
            suppressed,
            notification_cleared,
        })
    }

    async fn load_document(&self) -> Result<Settings> {
        let Some(store) = &self.store else {
            tracing::debug!("Settings store unavailable, using empty document");
            return Ok(Settings::default());
        };

        match store.load().await {
            Ok(settings) => Ok(settings),
            Err(error) if error.is_malformed() => {
                tracing::warn!("{error}; falling back to empty settings");
                Ok(Settings::default())
            }
            Err(error) => Err(error),
        }
    }

    fn next_seq(&self) -> u64 {
        self.load_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record the GPU mode of `settings` unless a newer load already did.
    fn publish_gpu_mode(&self, seq: u64, settings: &Settings) -> bool {
        let mut snapshot = self.gpu_mode.lock().unwrap_or_else(PoisonError::into_inner);
        if seq <= snapshot.seq {
            tracing::debug!("Discarding stale settings load #{seq}");
            return false;
        }
        snapshot.seq = seq;
        snapshot.enabled = is_gpu_mode_enabled(settings);
        true
    }
}
