use std::path::PathBuf;

use accel_core::RunMode;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "accel")]
#[command(about = "Manage compute run mode settings and hardware notifications")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub settings_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update one or more settings
    Set {
        /// Compute run mode
        #[arg(long, value_enum)]
        run_mode: Option<RunModeArg>,
        /// Enable or disable hardware-mismatch notifications
        #[arg(long, value_name = "BOOL")]
        notify: Option<bool>,
        /// Comma-separated GPU ids to use (empty string clears the selection)
        #[arg(long, value_name = "IDS", value_delimiter = ',')]
        gpus_in_use: Option<Vec<String>>,
        /// Enable or disable the Vulkan backend
        #[arg(long, value_name = "BOOL")]
        vulkan: Option<bool>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether a hardware-mismatch notification can be dismissed
    Validate {
        /// Driver presence (falls back to the stored detection record)
        #[arg(long, value_enum)]
        driver: Option<Presence>,
        /// Toolkit presence (falls back to the stored detection record)
        #[arg(long, value_enum)]
        cuda: Option<Presence>,
        /// Delay before validating, in milliseconds
        #[arg(long, default_value = "0", value_name = "MS")]
        delay_ms: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved settings file path
    Path,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RunModeArg {
    Cpu,
    Gpu,
}

impl From<RunModeArg> for RunMode {
    fn from(value: RunModeArg) -> Self {
        match value {
            RunModeArg::Cpu => Self::Cpu,
            RunModeArg::Gpu => Self::Gpu,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Presence {
    Present,
    Absent,
}

impl Presence {
    pub const fn exists(self) -> bool {
        matches!(self, Self::Present)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
