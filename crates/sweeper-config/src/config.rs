use crate::constants;
use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Clone)]
pub struct SweeperConfig {
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    #[serde(default = "default_patterns")]
    pub default_patterns: Vec<String>,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    #[serde(default = "default_older_than_days")]
    pub older_than_days: u32,

    #[serde(default = "default_keep_max")]
    pub keep_max: usize,

    #[serde(default = "default_keep_min")]
    pub keep_min: usize,
}

/// A directory listed in the config file. Unset fields fall back to the
/// top-level `policy` table and `dry_run` flag.
#[derive(Debug, Deserialize, Clone)]
pub struct TargetConfig {
    pub path: PathBuf,

    pub dry_run: Option<bool>,

    pub older_than_days: Option<u32>,

    pub keep_max: Option<usize>,

    pub keep_min: Option<usize>,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            dry_run: default_dry_run(),
            default_patterns: default_patterns(),
            policy: PolicyConfig::default(),
            targets: Vec::new(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            older_than_days: default_older_than_days(),
            keep_max: default_keep_max(),
            keep_min: default_keep_min(),
        }
    }
}

impl TargetConfig {
    pub fn policy(&self, defaults: &PolicyConfig) -> PolicyConfig {
        PolicyConfig {
            older_than_days: self.older_than_days.unwrap_or(defaults.older_than_days),
            keep_max: self.keep_max.unwrap_or(defaults.keep_max),
            keep_min: self.keep_min.unwrap_or(defaults.keep_min),
        }
    }
}

fn default_dry_run() -> bool {
    constants::DEFAULT_DRY_RUN
}

fn default_patterns() -> Vec<String> {
    vec![constants::DEFAULT_PATTERN.to_string()]
}

fn default_older_than_days() -> u32 {
    constants::DEFAULT_OLDER_THAN_DAYS
}

fn default_keep_max() -> usize {
    constants::DEFAULT_KEEP_MAX
}

fn default_keep_min() -> usize {
    constants::DEFAULT_KEEP_MIN
}

/// Reads a TOML config file. A missing file yields the built-in defaults.
pub fn load_config(path: &Path) -> Result<SweeperConfig> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(SweeperConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
