use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use accel_core::{DetectionResult, ValidationOutcome, ValidationScheduler};

use crate::cli::Presence;
use crate::commands::common::open_service;
use crate::error::CliError;

/// Detection from flags, or `None` to use the records stored in settings.
pub fn detection_from_args(
    driver: Option<Presence>,
    cuda: Option<Presence>,
) -> Option<DetectionResult> {
    if driver.is_none() && cuda.is_none() {
        return None;
    }
    Some(DetectionResult::from_flags(
        driver.map(Presence::exists),
        cuda.map(Presence::exists),
    ))
}

pub fn format_outcome_lines(outcome: &ValidationOutcome) -> Vec<String> {
    let presence = |value: Option<bool>| match value {
        Some(true) => "present",
        Some(false) => "absent",
        None => "unknown",
    };
    vec![
        format!(
            "driver:       {}",
            presence(outcome.detection.driver_present())
        ),
        format!("cuda:         {}", presence(outcome.detection.cuda_present())),
        format!(
            "notification: {}",
            if outcome.notification_cleared {
                "cleared"
            } else {
                "kept"
            }
        ),
        format!(
            "gpu_mode:     {}",
            if outcome.gpu_mode_enabled {
                "enabled"
            } else {
                "disabled"
            }
        ),
    ]
}

pub async fn run_validate(
    detection: Option<DetectionResult>,
    delay: Duration,
    as_json: bool,
    settings_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let outcome = validate_settings(detection, delay, settings_path).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for line in format_outcome_lines(&outcome) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Raise the notification, then run one scheduled validation pass over it.
pub async fn validate_settings(
    detection: Option<DetectionResult>,
    delay: Duration,
    settings_path: Option<PathBuf>,
) -> Result<ValidationOutcome, CliError> {
    let service = Arc::new(open_service(settings_path));
    // The notification is what a mismatch detector would have shown.
    service.notification().raise();

    let scheduler = ValidationScheduler::new(service);
    let outcome = scheduler
        .schedule(delay, detection)
        .wait()
        .await
        .ok_or(CliError::ValidationCancelled)??;
    Ok(outcome)
}
