//! Shared helpers for CLI commands

pub mod editor;
pub mod git;
pub mod topic;

use crate::commands::error::CommandError;
use std::io::Write;
use std::time::Duration;

/// Parse a non-negative number of seconds (`0.2`, `5`) for clap
pub fn parse_secs(raw: &str) -> Result<Duration, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| CommandError::InvalidDuration(raw.to_string()))
}

/// Write a message body to stdout verbatim (no trailing newline added)
pub fn print_body(body: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(body.as_bytes())?;
    stdout.flush()
}
