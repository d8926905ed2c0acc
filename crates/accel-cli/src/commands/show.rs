use std::path::PathBuf;

use crate::commands::common::{format_settings_lines, open_service};
use crate::error::CliError;

pub async fn run_show(as_json: bool, settings_path: Option<PathBuf>) -> Result<(), CliError> {
    let service = open_service(settings_path);
    let settings = service.load().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        for line in format_settings_lines(&settings, service.is_gpu_mode_enabled()) {
            println!("{line}");
        }
    }

    Ok(())
}
