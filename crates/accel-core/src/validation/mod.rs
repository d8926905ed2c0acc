//! Delayed settings validation.
//!
//! A validation pass runs once after a delay. At most one pass is pending per
//! scheduler: scheduling again cancels the pass that has not finished yet.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::{AbortHandle, JoinHandle};

use crate::models::DetectionResult;
use crate::services::{SettingsService, ValidationOutcome};
use crate::store::SettingsStore;
use crate::Result;

/// Delay used by clients that validate shortly after startup.
pub const DEFAULT_VALIDATION_DELAY: Duration = Duration::from_secs(3);

/// Handle to one scheduled validation pass.
#[derive(Debug)]
pub struct ValidationHandle {
    task: JoinHandle<Result<ValidationOutcome>>,
}

impl ValidationHandle {
    /// Cancel the pass if it has not completed.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the pass. Returns `None` if it was cancelled.
    pub async fn wait(self) -> Option<Result<ValidationOutcome>> {
        match self.task.await {
            Ok(result) => Some(result),
            Err(error) if error.is_cancelled() => None,
            Err(error) => std::panic::resume_unwind(error.into_panic()),
        }
    }
}

/// Schedules validation passes against a shared [`SettingsService`].
///
/// Dropping the scheduler cancels its pending pass.
pub struct ValidationScheduler<S> {
    service: Arc<SettingsService<S>>,
    pending: Mutex<Option<AbortHandle>>,
}

impl<S: SettingsStore + 'static> ValidationScheduler<S> {
    pub fn new(service: Arc<SettingsService<S>>) -> Self {
        Self {
            service,
            pending: Mutex::new(None),
        }
    }

    pub const fn service(&self) -> &Arc<SettingsService<S>> {
        &self.service
    }

    /// Run a validation pass after `delay`, cancelling any pending pass.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, delay: Duration, detection: Option<DetectionResult>) -> ValidationHandle {
        let service = Arc::clone(&self.service);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            service.validate(detection.as_ref()).await
        });

        let previous = self.lock_pending().replace(task.abort_handle());
        if let Some(previous) = previous {
            if !previous.is_finished() {
                tracing::debug!("Superseding pending settings validation");
            }
            previous.abort();
        }

        tracing::debug!("Scheduled settings validation in {:?}", delay);
        ValidationHandle { task }
    }

    /// Cancel the pending pass. Returns true if one was still running.
    pub fn cancel_pending(&self) -> bool {
        self.lock_pending().take().is_some_and(|pending| {
            let running = !pending.is_finished();
            pending.abort();
            running
        })
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<AbortHandle>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> Drop for ValidationScheduler<S> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pending) = pending {
            pending.abort();
        }
    }
}
