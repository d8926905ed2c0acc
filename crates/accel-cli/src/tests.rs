use std::path::PathBuf;
use std::time::Duration;

use accel_core::config::settings_path_in;
use accel_core::{FieldUpdate, RunMode, Settings};
use clap::Parser;
use pretty_assertions::assert_eq;

use crate::cli::{Cli, Commands, CompletionShell, Presence, RunModeArg};
use crate::commands::common::{
    format_settings_lines, normalize_gpu_ids, open_service, resolve_settings_path_from,
};
use crate::commands::completions::render_completions;
use crate::commands::set::{build_update, run_set};
use crate::commands::show::run_show;
use crate::commands::validate::{
    detection_from_args, format_outcome_lines, run_validate, validate_settings,
};
use crate::error::CliError;

#[test]
fn explicit_settings_path_beats_environment() {
    let resolved = resolve_settings_path_from(
        Some(PathBuf::from("/explicit/settings.json")),
        Some("/env/settings.json".to_string()),
    );
    assert_eq!(resolved, Some(PathBuf::from("/explicit/settings.json")));
}

#[test]
fn environment_settings_path_is_trimmed() {
    let resolved = resolve_settings_path_from(None, Some("  /env/settings.json ".to_string()));
    assert_eq!(resolved, Some(PathBuf::from("/env/settings.json")));
}

#[test]
fn blank_environment_path_is_ignored() {
    let resolved = resolve_settings_path_from(None, Some("   ".to_string()));
    assert_eq!(resolved, accel_core::config::default_settings_path());
}

#[test]
fn normalize_gpu_ids_drops_blanks() {
    assert_eq!(
        normalize_gpu_ids(vec![" 0".to_string(), String::new(), "1 ".to_string()]),
        vec!["0".to_string(), "1".to_string()]
    );
}

#[test]
fn build_update_rejects_empty_update() {
    assert!(matches!(
        build_update(None, None, None, None),
        Err(CliError::EmptyUpdate)
    ));
}

#[test]
fn build_update_maps_flags() {
    let update = build_update(
        Some(RunModeArg::Cpu),
        None,
        Some(vec![String::new()]),
        Some(true),
    )
    .unwrap();
    assert_eq!(update.run_mode, FieldUpdate::Set(RunMode::Cpu));
    assert_eq!(update.notify, FieldUpdate::Unchanged);
    assert_eq!(update.gpus_in_use, FieldUpdate::Set(Vec::new()));
    assert_eq!(update.vulkan, FieldUpdate::Set(true));
}

#[test]
fn set_command_parses_comma_separated_gpus() {
    let cli = Cli::parse_from([
        "accel",
        "set",
        "--gpus-in-use",
        "0,2",
        "--notify",
        "false",
    ]);
    let Some(Commands::Set {
        gpus_in_use,
        notify,
        vulkan,
        ..
    }) = cli.command
    else {
        panic!("expected set command");
    };
    assert_eq!(gpus_in_use, Some(vec!["0".to_string(), "2".to_string()]));
    assert_eq!(notify, Some(false));
    assert_eq!(vulkan, None);
}

#[test]
fn detection_from_args_defers_to_stored_records_without_flags() {
    assert_eq!(detection_from_args(None, None), None);

    let detection = detection_from_args(Some(Presence::Absent), None).unwrap();
    assert_eq!(detection.driver_present(), Some(false));
    assert_eq!(detection.cuda_present(), None);
}

#[test]
fn format_settings_lines_marks_unset_fields() {
    let settings = Settings {
        run_mode: Some(RunMode::Gpu),
        vulkan: Some(true),
        gpus_in_use: Some(Vec::new()),
        ..Settings::default()
    };
    let lines = format_settings_lines(&settings, true);
    assert_eq!(
        lines,
        vec![
            "run_mode:    gpu".to_string(),
            "notify:      unset".to_string(),
            "vulkan:      on".to_string(),
            "gpus:        unset".to_string(),
            "gpus_in_use: none".to_string(),
            "gpu_mode:    enabled".to_string(),
        ]
    );
}

#[test]
fn completions_mention_binary_name() {
    let script = String::from_utf8(render_completions(CompletionShell::Bash)).unwrap();
    assert!(script.contains("accel"));
}

#[tokio::test]
async fn set_then_show_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path_in(dir.path());

    let update = build_update(None, Some(true), None, Some(false)).unwrap();
    run_set(&update, true, Some(path.clone())).await.unwrap();
    run_show(false, Some(path.clone())).await.unwrap();

    let settings = open_service(Some(path)).load().await.unwrap();
    assert_eq!(settings.notify, Some(true));
    assert_eq!(settings.vulkan, Some(false));
    assert_eq!(settings.run_mode, Some(RunMode::Cpu));
}

#[tokio::test]
async fn validate_clears_notification_when_toolkit_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path_in(dir.path());
    let update = build_update(None, Some(true), None, None).unwrap();
    run_set(&update, true, Some(path.clone())).await.unwrap();

    let outcome = validate_settings(
        detection_from_args(Some(Presence::Present), Some(Presence::Absent)),
        Duration::ZERO,
        Some(path),
    )
    .await
    .unwrap();

    assert!(outcome.suppressed);
    assert!(outcome.notification_cleared);
    assert_eq!(
        format_outcome_lines(&outcome),
        vec![
            "driver:       present".to_string(),
            "cuda:         absent".to_string(),
            "notification: cleared".to_string(),
            "gpu_mode:     disabled".to_string(),
        ]
    );
}

#[tokio::test]
async fn validate_keeps_notification_when_hardware_matches() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path_in(dir.path());
    let update = build_update(None, Some(true), None, Some(true)).unwrap();
    run_set(&update, true, Some(path.clone())).await.unwrap();

    let outcome = validate_settings(
        detection_from_args(Some(Presence::Present), Some(Presence::Present)),
        Duration::ZERO,
        Some(path),
    )
    .await
    .unwrap();

    assert!(!outcome.suppressed);
    assert!(!outcome.notification_cleared);
    assert!(outcome.gpu_mode_enabled);
}

#[tokio::test]
async fn validate_command_uses_stored_detection_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path_in(dir.path());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"notify":true,"nvidia_driver":{"exist":false}}"#).unwrap();

    let outcome = validate_settings(None, Duration::ZERO, Some(path.clone()))
        .await
        .unwrap();
    assert!(outcome.notification_cleared);

    run_validate(None, Duration::ZERO, true, Some(path)).await.unwrap();
}

#[test]
fn log_filter_enables_accel_info() {
    assert!(crate::log_filter().to_string().contains("accel=info"));
}
