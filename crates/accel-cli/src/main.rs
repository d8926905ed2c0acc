//! Accel CLI - inspect and update compute run mode settings
//!
//! Reads and writes the same settings document as every other Accel client.

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use std::time::Duration;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::completions::run_completions;
use crate::commands::path::run_path;
use crate::commands::set::{build_update, run_set};
use crate::commands::show::run_show;
use crate::commands::validate::{detection_from_args, run_validate};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter())
        .init();

    let cli = Cli::parse();
    let settings_path = cli.settings_path;

    match cli.command {
        Some(Commands::Show { json }) => run_show(json, settings_path).await?,
        Some(Commands::Set {
            run_mode,
            notify,
            gpus_in_use,
            vulkan,
            json,
        }) => {
            let update = build_update(run_mode, notify, gpus_in_use, vulkan)?;
            run_set(&update, json, settings_path).await?;
        }
        Some(Commands::Validate {
            driver,
            cuda,
            delay_ms,
            json,
        }) => {
            run_validate(
                detection_from_args(driver, cuda),
                Duration::from_millis(delay_ms),
                json,
                settings_path,
            )
            .await?;
        }
        Some(Commands::Path) => run_path(settings_path)?,
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

fn log_filter() -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match "accel=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}
