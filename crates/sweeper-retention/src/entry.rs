use crate::authorisation::AuthorisationFilter;
use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use sweeper_config::constants;
use tracing::warn;

/// A snapshot of one directory child, taken during a single listing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub modified: DateTime<Local>,
    pub is_dir: bool,
}

/// Lists the immediate children of `directory` accepted by `filter`.
///
/// Symbolic links are not followed. The manifest itself is never returned.
pub fn list_entries(directory: &Path, filter: &AuthorisationFilter) -> Result<Vec<Entry>> {
    let listing_error = |source| Error::Listing {
        path: directory.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();

    for child in std::fs::read_dir(directory).map_err(listing_error)? {
        let child = child.map_err(listing_error)?;
        let name = child.file_name();

        let Some(name) = name.to_str() else {
            warn!("Skipping non UTF-8 entry {:?}", child.path());
            continue;
        };

        if name == constants::MANIFEST_FILE_NAME || !filter.accepts(name) {
            continue;
        }

        let metadata = child.metadata().map_err(listing_error)?;
        let modified = metadata.modified().map_err(listing_error)?;

        entries.push(Entry {
            name: name.to_string(),
            path: child.path(),
            modified: DateTime::<Local>::from(modified),
            is_dir: metadata.is_dir(),
        });
    }

    Ok(entries)
}
