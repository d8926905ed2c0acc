//! Hardware detection results supplied by the probe

use serde::{Deserialize, Serialize};

/// Presence record for one driver or toolkit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub exist: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Capability {
    pub const fn present() -> Self {
        Self {
            exist: true,
            version: None,
        }
    }

    pub const fn absent() -> Self {
        Self {
            exist: false,
            version: None,
        }
    }
}

/// Driver and toolkit presence at validation time. Missing records mean the
/// probe did not report on that component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nvidia_driver: Option<Capability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuda: Option<Capability>,
}

impl DetectionResult {
    /// Build from plain presence flags, `None` meaning "not reported".
    pub fn from_flags(driver: Option<bool>, cuda: Option<bool>) -> Self {
        let record = |exist: bool| Capability {
            exist,
            version: None,
        };
        Self {
            nvidia_driver: driver.map(record),
            cuda: cuda.map(record),
        }
    }

    pub fn driver_present(&self) -> Option<bool> {
        self.nvidia_driver.as_ref().map(|c| c.exist)
    }

    pub fn cuda_present(&self) -> Option<bool> {
        self.cuda.as_ref().map(|c| c.exist)
    }
}
