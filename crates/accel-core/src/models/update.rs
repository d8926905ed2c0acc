//! Partial settings updates

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::settings::RunMode;

/// Change to a single settings field.
///
/// Deserializes from an optional value: an absent key or `null` is
/// [`FieldUpdate::Unchanged`]. Serializes back the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Keep whatever the current document holds
    Unchanged,
    /// Overwrite with this value
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unchanged, Self::Set)
    }
}

impl<T> FieldUpdate<T> {
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unchanged => None,
        }
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_set().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// Partial update applied to the settings document by
/// [`crate::resolver::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default)]
    pub run_mode: FieldUpdate<RunMode>,
    #[serde(default)]
    pub notify: FieldUpdate<bool>,
    #[serde(default)]
    pub gpus_in_use: FieldUpdate<Vec<String>>,
    #[serde(default)]
    pub vulkan: FieldUpdate<bool>,
}

impl SettingsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = FieldUpdate::Set(run_mode);
        self
    }

    #[must_use]
    pub fn with_notify(mut self, notify: bool) -> Self {
        self.notify = FieldUpdate::Set(notify);
        self
    }

    #[must_use]
    pub fn with_gpus_in_use(mut self, gpus: Vec<String>) -> Self {
        self.gpus_in_use = FieldUpdate::Set(gpus);
        self
    }

    #[must_use]
    pub fn with_vulkan(mut self, vulkan: bool) -> Self {
        self.vulkan = FieldUpdate::Set(vulkan);
        self
    }

    /// True when no field would change.
    pub const fn is_empty(&self) -> bool {
        !(self.run_mode.is_set()
            || self.notify.is_set()
            || self.gpus_in_use.is_set()
            || self.vulkan.is_set())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn absent_and_null_fields_are_unchanged() {
        let update: SettingsUpdate =
            serde_json::from_str(r#"{ "notify": null, "vulkan": true }"#).unwrap();
        assert_eq!(update.notify, FieldUpdate::Unchanged);
        assert_eq!(update.run_mode, FieldUpdate::Unchanged);
        assert_eq!(update.vulkan, FieldUpdate::Set(true));
    }

    #[test]
    fn camel_case_keys_are_accepted() {
        let update: SettingsUpdate =
            serde_json::from_str(r#"{ "runMode": "cpu", "gpusInUse": ["0", "2"] }"#).unwrap();
        assert_eq!(
            update,
            SettingsUpdate::new()
                .with_run_mode(RunMode::Cpu)
                .with_gpus_in_use(vec!["0".to_string(), "2".to_string()])
        );
    }

    #[test]
    fn empty_update_reports_empty() {
        assert!(SettingsUpdate::new().is_empty());
        assert!(!SettingsUpdate::new().with_notify(false).is_empty());
    }
}
