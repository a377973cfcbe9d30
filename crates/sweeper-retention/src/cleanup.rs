use crate::authorisation::{self, AuthorisationFilter};
use crate::entry;
use crate::error::{Error, Result};
use crate::policy::{Decision, RetentionPolicy};
use crate::remove::{EntryRemover, TreeRemover};
use crate::report::{CleanupReport, KeptEntry, RemovalFailure, RemovedEntry};
use chrono::{DateTime, Local};
use std::path::Path;
use sweeper_config::constants;
use tracing::{debug, info, warn};

/// Applies one retention policy to release directories.
///
/// Every call lists the directory once and works from that snapshot. Entries
/// added or touched by someone else between listing and removal are not
/// noticed.
#[derive(Debug, Clone)]
pub struct Cleaner<R = TreeRemover> {
    policy: RetentionPolicy,
    dry_run: bool,
    default_patterns: Vec<String>,
    remover: R,
}

impl Cleaner {
    pub fn new(policy: RetentionPolicy, dry_run: bool) -> Self {
        Self {
            policy,
            dry_run,
            default_patterns: vec![constants::DEFAULT_PATTERN.to_string()],
            remover: TreeRemover,
        }
    }
}

impl<R: EntryRemover> Cleaner<R> {
    pub fn with_remover<S: EntryRemover>(self, remover: S) -> Cleaner<S> {
        Cleaner {
            policy: self.policy,
            dry_run: self.dry_run,
            default_patterns: self.default_patterns,
            remover,
        }
    }

    /// Patterns used for directories whose manifest is empty.
    pub fn with_default_patterns(mut self, patterns: Vec<String>) -> Self {
        self.default_patterns = patterns;
        self
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn cleanup(&self, directory: &Path) -> Result<CleanupReport> {
        self.cleanup_at(directory, Local::now())
    }

    /// Same as [`Cleaner::cleanup`] with "today" derived from `now`.
    pub fn cleanup_at(&self, directory: &Path, now: DateTime<Local>) -> Result<CleanupReport> {
        if !directory.is_dir() {
            return Err(Error::NotADirectory(directory.to_path_buf()));
        }

        let patterns = authorisation::load_manifest(directory)?;
        let filter = AuthorisationFilter::new(patterns, &self.default_patterns);
        let entries = entry::list_entries(directory, &filter)?;
        let eligible = entries.len();

        info!(
            "Cleaning {} ({} eligible, older_than={}d, keep_max={}, keep_min={}, dry_run={})",
            directory.display(),
            eligible,
            self.policy.older_than_days,
            self.policy.keep_max,
            self.policy.keep_min,
            self.dry_run
        );

        if eligible <= self.policy.keep_min {
            debug!(
                "{} eligible entries within keep_min={}, nothing to do",
                eligible, self.policy.keep_min
            );
        }

        let plan = self.policy.plan(entries, now);

        let mut report = CleanupReport {
            directory: directory.to_path_buf(),
            dry_run: self.dry_run,
            eligible,
            cutoff: plan.cutoff,
            removed: Vec::new(),
            kept: Vec::new(),
            failures: Vec::new(),
        };

        for planned in plan.entries {
            let entry = planned.entry;

            match planned.decision {
                Decision::Keep(reason) => {
                    debug!(entry = %entry.name, modified = %entry.modified, %reason, "Keeping entry");
                    report.kept.push(KeptEntry { entry, reason });
                }
                Decision::Remove(reason) => {
                    if self.dry_run {
                        info!(entry = %entry.name, modified = %entry.modified, %reason, "Would remove entry (dry run)");
                    } else if let Err(error) = self.remover.remove_entry(&entry.path) {
                        warn!("Failed to remove {}: {}", entry.path.display(), error);
                        report.failures.push(RemovalFailure {
                            entry: entry.clone(),
                            error,
                        });
                    } else {
                        info!(entry = %entry.name, modified = %entry.modified, %reason, "Removed entry");
                    }

                    report.removed.push(RemovedEntry { entry, reason });
                }
            }
        }

        info!(
            "Cleaned {}: {} removed, {} kept, {} failed",
            directory.display(),
            report.removed_count(),
            report.kept_count(),
            report.failures.len()
        );

        Ok(report)
    }
}

/// Cleans `directory` and returns the number of entries removed, or that
/// would be removed in a dry run.
pub fn cleanup(directory: &Path, policy: RetentionPolicy, dry_run: bool) -> Result<usize> {
    Cleaner::new(policy, dry_run)
        .cleanup(directory)
        .map(|report| report.removed_count())
}
