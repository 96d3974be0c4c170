//! Configuration types

use crate::poll::{DEFAULT_POLL_INTERVAL, PollOptions};
use crate::store::QueueStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Blocking-get configuration
    #[serde(default)]
    pub poll: PollConfig,
}

/// `[store]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Queue directory; `~/` expands to the home directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    /// Bound on lock waits in milliseconds; absent means wait forever
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_timeout_ms: Option<u64>,
}

/// `[poll]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Pause between dequeue attempts (default: 200)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Wake early on file change notifications (default: true)
    #[serde(default = "default_watch")]
    pub watch: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            watch: default_watch(),
        }
    }
}

fn default_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_watch() -> bool {
    true
}

/// Fully resolved settings, ready to build a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSettings {
    /// Directory holding all topic documents and lock files
    pub base_dir: PathBuf,
    /// Bound on lock waits; `None` waits forever
    pub lock_timeout: Option<Duration>,
    /// Pause between blocking-get attempts
    pub poll_interval: Duration,
    /// Wake blocking gets early on file changes
    pub watch: bool,
}

impl QueueSettings {
    pub fn store(&self) -> QueueStore {
        QueueStore::new(&self.base_dir).with_lock_timeout(self.lock_timeout)
    }

    /// Poll options with an optional overall timeout
    pub fn poll_options(&self, timeout: Option<Duration>) -> PollOptions {
        PollOptions {
            interval: self.poll_interval,
            timeout,
            watch: self.watch,
        }
    }
}
