use std::path::PathBuf;

use crate::commands::common::resolve_settings_path;
use crate::error::CliError;

pub fn run_path(settings_path: Option<PathBuf>) -> Result<(), CliError> {
    let path = resolve_settings_path(settings_path).ok_or(CliError::NoSettingsPath)?;
    println!("{}", path.display());
    Ok(())
}
