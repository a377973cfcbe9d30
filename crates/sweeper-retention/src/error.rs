use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors. Any of these aborts a cleanup before a single
/// retention decision is made.
#[derive(Error, Debug)]
pub enum Error {
    #[error("not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("authorisation manifest not found: {0:?} (refusing to clean this directory)")]
    ManifestMissing(PathBuf),

    #[error("failed to read authorisation manifest {path:?}: {source}")]
    ManifestUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to list directory {path:?}: {source}")]
    Listing {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
