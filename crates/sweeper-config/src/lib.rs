pub mod config;
pub mod constants;
mod error;

pub use config::{PolicyConfig, SweeperConfig, TargetConfig, load_config};
pub use error::{ConfigError, Result};
