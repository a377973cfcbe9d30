use crate::entry::Entry;
use crate::policy::{KeepReason, RemovalReason};
use chrono::{DateTime, Local};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RemovedEntry {
    pub entry: Entry,
    pub reason: RemovalReason,
}

#[derive(Debug, Clone)]
pub struct KeptEntry {
    pub entry: Entry,
    pub reason: KeepReason,
}

#[derive(Debug)]
pub struct RemovalFailure {
    pub entry: Entry,
    pub error: std::io::Error,
}

/// What one cleanup run decided and did for a single directory.
///
/// In a dry run `removed` lists the entries that would have been removed.
#[derive(Debug)]
pub struct CleanupReport {
    pub directory: PathBuf,
    pub dry_run: bool,
    pub eligible: usize,
    pub cutoff: DateTime<Local>,
    pub removed: Vec<RemovedEntry>,
    pub kept: Vec<KeptEntry>,
    pub failures: Vec<RemovalFailure>,
}

impl CleanupReport {
    /// Entries marked for removal, including any whose removal failed.
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn kept_count(&self) -> usize {
        self.kept.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Totals across every directory handled in one invocation.
#[derive(Debug, Default, Clone)]
pub struct SweepSummary {
    pub directories: usize,
    pub failed_directories: usize,
    pub removed: usize,
    pub removal_failures: usize,
}

impl SweepSummary {
    pub fn record(&mut self, report: &CleanupReport) {
        self.directories += 1;
        self.removed += report.removed_count();
        self.removal_failures += report.failures.len();
    }

    pub fn record_error(&mut self) {
        self.directories += 1;
        self.failed_directories += 1;
    }

    pub fn is_success(&self) -> bool {
        self.failed_directories == 0 && self.removal_failures == 0
    }
}
