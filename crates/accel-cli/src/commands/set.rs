use std::path::PathBuf;

use accel_core::{FieldUpdate, RunMode, SettingsUpdate};

use crate::cli::RunModeArg;
use crate::commands::common::{format_settings_lines, normalize_gpu_ids, open_service};
use crate::error::CliError;

pub fn build_update(
    run_mode: Option<RunModeArg>,
    notify: Option<bool>,
    gpus_in_use: Option<Vec<String>>,
    vulkan: Option<bool>,
) -> Result<SettingsUpdate, CliError> {
    let update = SettingsUpdate {
        run_mode: run_mode.map(RunMode::from).into(),
        notify: notify.into(),
        gpus_in_use: gpus_in_use
            .map_or(FieldUpdate::Unchanged, |ids| FieldUpdate::Set(normalize_gpu_ids(ids))),
        vulkan: vulkan.into(),
    };

    if update.is_empty() {
        return Err(CliError::EmptyUpdate);
    }
    Ok(update)
}

pub async fn run_set(
    update: &SettingsUpdate,
    as_json: bool,
    settings_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let service = open_service(settings_path);
    let settings = service.save_settings(update).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        for line in format_settings_lines(&settings, service.is_gpu_mode_enabled()) {
            println!("{line}");
        }
    }

    Ok(())
}
