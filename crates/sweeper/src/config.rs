use crate::cli::Cli;
use anyhow::{Context, bail};
use std::path::{Path, PathBuf};
use sweeper_config::{PolicyConfig, SweeperConfig, constants};
use sweeper_retention::RetentionPolicy;
use tracing::warn;

/// One directory to clean, with its effective settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub directory: PathBuf,
    pub policy: RetentionPolicy,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub targets: Vec<Target>,
    pub default_patterns: Vec<String>,
}

/// An explicit `--config` path must exist; the implicit default may be absent.
pub fn load_file_config(path: Option<&Path>) -> anyhow::Result<SweeperConfig> {
    let path = match path {
        Some(path) if !path.exists() => bail!("config file {} does not exist", path.display()),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(constants::DEFAULT_CONFIG_PATH),
    };

    sweeper_config::load_config(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}

/// Command line (and environment) values win over per-target config values,
/// which win over the config file's `[policy]` table.
pub fn resolve(cli: &Cli, file: &SweeperConfig) -> anyhow::Result<Settings> {
    let mut targets = Vec::new();

    for target in &file.targets {
        targets.push(Target {
            directory: target.path.clone(),
            policy: apply_overrides(cli, target.policy(&file.policy)),
            dry_run: cli.dry_run.or(target.dry_run).unwrap_or(file.dry_run),
        });
    }

    for directory in &cli.directories {
        targets.push(Target {
            directory: directory.clone(),
            policy: apply_overrides(cli, file.policy),
            dry_run: cli.dry_run.unwrap_or(file.dry_run),
        });
    }

    if targets.is_empty() {
        bail!("no directories to clean: pass them as arguments or list [[targets]] in the config");
    }

    for target in &targets {
        if target.policy.keep_min > target.policy.keep_max {
            warn!(
                "keep_min ({}) exceeds keep_max ({}) for {}; keep_min wins",
                target.policy.keep_min,
                target.policy.keep_max,
                target.directory.display()
            );
        }
    }

    let default_patterns = if cli.patterns.is_empty() {
        file.default_patterns.clone()
    } else {
        cli.patterns.clone()
    };

    Ok(Settings {
        targets,
        default_patterns,
    })
}

fn apply_overrides(cli: &Cli, policy: PolicyConfig) -> RetentionPolicy {
    let base = RetentionPolicy::from(policy);

    RetentionPolicy::new(
        cli.older_than.unwrap_or(base.older_than_days),
        cli.keep_max.unwrap_or(base.keep_max),
        cli.keep_min.unwrap_or(base.keep_min),
    )
}
