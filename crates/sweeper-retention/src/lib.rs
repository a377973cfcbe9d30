mod authorisation;
mod cleanup;
mod entry;
mod error;
mod policy;
mod remove;
mod report;

pub use authorisation::{AuthorisationFilter, load_manifest};
pub use cleanup::{Cleaner, cleanup};
pub use entry::{Entry, list_entries};
pub use error::{Error, Result};
pub use policy::{
    Decision, KeepReason, PlannedEntry, RemovalReason, RetentionPlan, RetentionPolicy, age_cutoff,
};
pub use remove::{EntryRemover, TreeRemover, remove_tree};
pub use report::{CleanupReport, KeptEntry, RemovalFailure, RemovedEntry, SweepSummary};
