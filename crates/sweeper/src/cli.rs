use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Prune old release directories under a retention policy.
///
/// Only directories holding a `.cleanup-authorisation` manifest are touched.
#[derive(Parser, Debug)]
#[command(name = "sweeper", version, long_about = None)]
pub struct Cli {
    /// Directories to clean, in addition to the targets listed in the config file
    #[arg(value_name = "DIRECTORY")]
    pub directories: Vec<PathBuf>,

    /// Only report what would be removed (default: true)
    #[arg(long, env = "SWEEPER_DRY_RUN", value_name = "BOOL", action = ArgAction::Set)]
    pub dry_run: Option<bool>,

    /// Entries modified before local midnight this many days ago may be removed (default: 10)
    #[arg(long, env = "SWEEPER_OLDER_THAN", value_name = "DAYS")]
    pub older_than: Option<u32>,

    /// Maximum number of entries to keep (default: 15)
    #[arg(long, env = "SWEEPER_KEEP_MAX", value_name = "COUNT")]
    pub keep_max: Option<usize>,

    /// Minimum number of entries to keep (default: 5)
    #[arg(long, env = "SWEEPER_KEEP_MIN", value_name = "COUNT")]
    pub keep_min: Option<usize>,

    /// Pattern used when a manifest is empty (repeatable, default: -S-)
    #[arg(long = "pattern", value_name = "SUBSTRING", allow_hyphen_values = true)]
    pub patterns: Vec<String>,

    /// Config file (default: ./sweeper.toml when present)
    #[arg(long, env = "SWEEPER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
