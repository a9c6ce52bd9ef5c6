//! Shared argument handling for all subcommands.

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Args;
use clap::ValueEnum;
use contrib_rank::Result;
use contrib_rank::misc::ColorMode;
use contrib_rank::store::{Roster, load_or_create, load_roster, save_roster};

const DEFAULT_PROJECT_NAME: &str = "Contribution Drive";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Arguments shared by every subcommand
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to the roster file
    #[arg(long, default_value = "roster.json", value_name = "PATH")]
    pub roster: Utf8PathBuf,

    /// Project name used when creating a fresh roster
    #[arg(long, default_value = DEFAULT_PROJECT_NAME, value_name = "NAME")]
    pub project: String,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

pub struct Common {
    roster_path: Utf8PathBuf,
    project: String,
    pub color: ColorMode,
}

impl Common {
    pub fn new(args: &CommonArgs) -> Self {
        init_logging(args.log_level);

        Self {
            roster_path: args.roster.clone(),
            project: args.project.clone(),
            color: args.color,
        }
    }

    /// Load the roster, failing when the file is missing or malformed.
    pub fn load(&self) -> Result<Roster> {
        load_roster(&self.roster_path)
    }

    /// Load the roster, starting a fresh one when the file does not exist.
    pub fn load_or_create(&self, now: DateTime<Utc>) -> Result<Roster> {
        load_or_create(&self.roster_path, &self.project, now)
    }

    pub fn save(&self, roster: &Roster) -> Result<()> {
        save_roster(roster, &self.roster_path)
    }
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    if log_level == LogLevel::None {
        return;
    }

    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}
