//! Persisted settings document

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::detection::{Capability, DetectionResult};

/// Effective compute backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Run on the CPU
    Cpu,
    /// Run on one or more GPUs
    Gpu,
}

impl RunMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single settings document of an installation.
///
/// Every field is optional so that a fresh installation is represented by
/// the empty document `{}`. Unset fields are left out when serialized.
/// Keys this type does not know about (written by other components, such as
/// the hardware probe) are kept in [`Settings::extra`] and written back
/// untouched. A known key holding a value of another shape is kept there too,
/// and its field reads as unset. Only content that is not a JSON object fails
/// to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Settings {
    /// Effective compute mode, derived from `vulkan` and `gpus` on write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_mode: Option<RunMode>,
    /// Whether hardware-mismatch notifications are wanted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
    /// GPU device ids selected by the user, in preference order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpus_in_use: Option<Vec<String>>,
    /// Whether the Vulkan backend is explicitly enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulkan: Option<bool>,
    /// Every GPU detected on the host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpus: Option<Vec<String>>,
    /// Driver detection record written by the hardware probe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvidia_driver: Option<Capability>,
    /// Toolkit detection record written by the hardware probe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuda: Option<Capability>,
    /// Unrecognized keys, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_map)
    }
}

impl Settings {
    /// Split a raw JSON object into known fields and preserved keys.
    pub fn from_map(mut extra: Map<String, Value>) -> Self {
        Self {
            run_mode: take_field(&mut extra, "run_mode"),
            notify: take_field(&mut extra, "notify"),
            gpus_in_use: take_field(&mut extra, "gpus_in_use"),
            vulkan: take_field(&mut extra, "vulkan"),
            gpus: take_field(&mut extra, "gpus"),
            nvidia_driver: take_field(&mut extra, "nvidia_driver"),
            cuda: take_field(&mut extra, "cuda"),
            extra,
        }
    }

    /// True when no key at all is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Detected GPUs, empty when unset.
    pub fn gpus(&self) -> &[String] {
        self.gpus.as_deref().unwrap_or_default()
    }

    /// Number of detected GPUs.
    ///
    /// Counts a `gpus` array of any element shape, so entries written as
    /// objects are still counted.
    pub fn detected_gpu_count(&self) -> usize {
        self.gpus.as_ref().map_or_else(
            || self.extra.get("gpus").and_then(Value::as_array).map_or(0, Vec::len),
            Vec::len,
        )
    }

    /// Drop the raw value kept for a known key once its field is written.
    pub(crate) fn clear_raw(&mut self, key: &str) {
        self.extra.remove(key);
    }

    /// Selected GPUs, empty when unset.
    pub fn gpus_in_use(&self) -> &[String] {
        self.gpus_in_use.as_deref().unwrap_or_default()
    }

    /// Detection records stored alongside the settings.
    pub fn stored_detection(&self) -> DetectionResult {
        DetectionResult {
            nvidia_driver: self.nvidia_driver.clone(),
            cuda: self.cuda.clone(),
        }
    }
}

/// Parse `key` out of `raw`. A null is dropped; a value of another shape is
/// left in `raw` so it is written back unchanged.
fn take_field<T: DeserializeOwned>(raw: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = raw.remove(key)?;
    if value.is_null() {
        return None;
    }
    match T::deserialize(&value) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            tracing::warn!(key, %error, "Keeping settings key with unexpected shape as-is");
            raw.insert(key.to_string(), value);
            None
        }
    }
}
