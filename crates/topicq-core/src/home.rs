//! Canonical home directory resolution
//!
//! The home directory anchors the default queue directory
//! (`~/.local/state/q`) and the global config file (`~/.config/q/config.toml`).
//!
//! # Precedence
//!
//! 1. `Q_HOME` environment variable (if set and non-empty)
//! 2. `dirs::home_dir()` platform default
//!
//! # Testing
//!
//! Integration tests MUST use `Q_HOME` (or `Q_DIR`) so they never touch the
//! real user state:
//!
//! ```ignore
//! use assert_cmd::Command;
//! use tempfile::TempDir;
//!
//! let temp_dir = TempDir::new().unwrap();
//! let mut cmd = Command::cargo_bin("q").unwrap();
//! cmd.env("Q_HOME", temp_dir.path());
//! ```

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the home directory for queue operations
///
/// # Errors
///
/// Returns an error if `Q_HOME` is not set AND the platform home directory
/// cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("Q_HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    dirs::home_dir().context("Could not determine home directory")
}
