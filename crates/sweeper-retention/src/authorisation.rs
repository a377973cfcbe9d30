use crate::error::{Error, Result};
use std::path::Path;
use sweeper_config::constants;
use tracing::debug;

/// Decides which directory entries the retention engine may see.
///
/// A name is accepted when it contains at least one pattern as a literal,
/// case-sensitive substring.
#[derive(Debug, Clone)]
pub struct AuthorisationFilter {
    patterns: Vec<String>,
}

impl AuthorisationFilter {
    /// Falls back to `defaults` when `patterns` is empty.
    pub fn new(patterns: Vec<String>, defaults: &[String]) -> Self {
        if patterns.is_empty() {
            debug!("Manifest lists no patterns, using defaults {:?}", defaults);
            return Self {
                patterns: defaults.to_vec(),
            };
        }

        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn accepts(&self, name: &str) -> bool {
        let accepted = self
            .patterns
            .iter()
            .any(|pattern| name.contains(pattern.as_str()));

        if !accepted {
            debug!("Excluding {}: no authorisation pattern matches", name);
        }

        accepted
    }
}

/// Reads the patterns from `directory`'s authorisation manifest.
///
/// Empty lines are dropped: an empty pattern would match every name.
pub fn load_manifest(directory: &Path) -> Result<Vec<String>> {
    let path = directory.join(constants::MANIFEST_FILE_NAME);

    match path.try_exists() {
        Ok(true) => {}
        Ok(false) => return Err(Error::ManifestMissing(path)),
        Err(source) => return Err(Error::ManifestUnreadable { path, source }),
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|source| Error::ManifestUnreadable { path, source })?;

    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
