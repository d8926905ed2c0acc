use std::env;
use std::path::PathBuf;

use accel_core::config::default_settings_path;
use accel_core::{JsonFileSettingsStore, NotificationState, Settings, SettingsService};

pub const SETTINGS_PATH_ENV: &str = "ACCEL_SETTINGS_PATH";

pub type CliSettingsService = SettingsService<JsonFileSettingsStore>;

/// Resolve the settings file: explicit flag, then environment, then the
/// platform default.
pub fn resolve_settings_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    resolve_settings_path_from(explicit, env::var(SETTINGS_PATH_ENV).ok())
}

pub fn resolve_settings_path_from(
    explicit: Option<PathBuf>,
    env_value: Option<String>,
) -> Option<PathBuf> {
    explicit
        .or_else(|| {
            env_value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .or_else(default_settings_path)
}

pub fn open_service(settings_path: Option<PathBuf>) -> CliSettingsService {
    let store = resolve_settings_path(settings_path).map(JsonFileSettingsStore::new);
    SettingsService::with_optional_store(store, NotificationState::default())
}

/// Drop blank ids so `--gpus-in-use ""` selects no GPUs.
pub fn normalize_gpu_ids(ids: Vec<String>) -> Vec<String> {
    ids.into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

fn format_flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "on",
        Some(false) => "off",
        None => "unset",
    }
}

fn format_list(values: Option<&[String]>) -> String {
    match values {
        Some([]) => "none".to_string(),
        Some(values) => values.join(", "),
        None => "unset".to_string(),
    }
}

pub fn format_settings_lines(settings: &Settings, gpu_mode_enabled: bool) -> Vec<String> {
    vec![
        format!(
            "run_mode:    {}",
            settings
                .run_mode
                .map_or_else(|| "unset".to_string(), |mode| mode.to_string())
        ),
        format!("notify:      {}", format_flag(settings.notify)),
        format!("vulkan:      {}", format_flag(settings.vulkan)),
        format!("gpus:        {}", format_list(settings.gpus.as_deref())),
        format!("gpus_in_use: {}", format_list(settings.gpus_in_use.as_deref())),
        format!(
            "gpu_mode:    {}",
            if gpu_mode_enabled { "enabled" } else { "disabled" }
        ),
    ]
}
