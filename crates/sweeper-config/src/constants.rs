/// Name of the file that must exist inside a directory before it may be cleaned.
pub const MANIFEST_FILE_NAME: &str = ".cleanup-authorisation";

/// Pattern used when a manifest lists no patterns. Marks real release directories.
pub const DEFAULT_PATTERN: &str = "-S-";

pub const DEFAULT_CONFIG_PATH: &str = "sweeper.toml";

pub const DEFAULT_DRY_RUN: bool = true;
pub const DEFAULT_OLDER_THAN_DAYS: u32 = 10;
pub const DEFAULT_KEEP_MAX: usize = 15;
pub const DEFAULT_KEEP_MIN: usize = 5;
