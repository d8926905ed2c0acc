//! Run mode derivation and notification resolution.
//!
//! These are pure functions over the settings document. `run_mode` is a
//! cached projection of `vulkan` and `gpus`: [`merge`] is the only writer
//! that recomputes it, and it does so whenever an update touches `vulkan`.

use crate::models::{DetectionResult, FieldUpdate, RunMode, Settings, SettingsUpdate};

/// Apply `update` to `current`, returning the new document.
///
/// `run_mode`, `notify` and `gpus_in_use` are overwritten when set. A set
/// `vulkan` also re-derives `run_mode`, taking precedence over a `run_mode`
/// supplied in the same update. A written field replaces any raw value kept
/// for its key.
pub fn merge(current: &Settings, update: &SettingsUpdate) -> Settings {
    let mut next = current.clone();

    if let FieldUpdate::Set(run_mode) = update.run_mode {
        next.run_mode = Some(run_mode);
        next.clear_raw("run_mode");
    }
    if let FieldUpdate::Set(notify) = update.notify {
        next.notify = Some(notify);
        next.clear_raw("notify");
    }
    if let FieldUpdate::Set(gpus) = &update.gpus_in_use {
        next.gpus_in_use = Some(gpus.clone());
        next.clear_raw("gpus_in_use");
    }
    if let FieldUpdate::Set(vulkan) = update.vulkan {
        next.vulkan = Some(vulkan);
        next.clear_raw("vulkan");
        next.run_mode = Some(derive_run_mode(vulkan, current.detected_gpu_count()));
        next.clear_raw("run_mode");
    }

    next
}

/// Run mode implied by the Vulkan toggle and the number of detected GPUs.
pub const fn derive_run_mode(vulkan: bool, detected_gpus: usize) -> RunMode {
    if vulkan || detected_gpus > 0 {
        RunMode::Gpu
    } else {
        RunMode::Cpu
    }
}

/// Whether a raised hardware-mismatch notification should be cleared.
///
/// Only applies when notifications are enabled. Suppresses when the driver
/// is missing, or when the driver is present without the toolkit. Returns
/// `false` whenever the records needed to decide are not reported.
pub fn should_suppress_notification(doc: &Settings, detection: &DetectionResult) -> bool {
    if doc.notify != Some(true) {
        return false;
    }

    match detection.driver_present() {
        Some(false) => true,
        Some(true) => detection.cuda_present() == Some(false),
        None => false,
    }
}

/// Whether the document selects GPU mode.
pub fn is_gpu_mode_enabled(doc: &Settings) -> bool {
    doc.run_mode == Some(RunMode::Gpu)
}
