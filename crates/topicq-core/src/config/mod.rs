//! Configuration resolution
//!
//! Resolves configuration from multiple sources with priority:
//! 1. Command-line flags (passed as parameters)
//! 2. Environment variables
//! 3. Config file (~/.config/q/config.toml)
//! 4. Defaults

mod discovery;
mod types;

pub use discovery::{ConfigError, ConfigOverrides, default_base_dir, resolve_config};
pub use types::{Config, PollConfig, QueueSettings, StoreConfig};
