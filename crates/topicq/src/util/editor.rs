//! Interactive editing via $VISUAL / $EDITOR

use crate::commands::error::CommandError;
use anyhow::{Context, Result};
use std::io::Write;
use std::process::Command;

/// Editor command from `VISUAL`, then `EDITOR`, defaulting to `vi`
///
/// The value is split with shell quoting rules, so `code --wait` and
/// `'/Applications/Sublime Text.app/bin/subl' -w` both work. A value that
/// does not parse (unbalanced quotes) is used as a single program path.
pub fn editor_cmd() -> Vec<String> {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .filter(|value| !value.trim().is_empty())
        .map(|value| shlex::split(&value).unwrap_or_else(|| vec![value]))
        .find(|parts| !parts.is_empty())
        .unwrap_or_else(|| vec!["vi".to_string()])
}

/// Open `initial` in the editor and return the saved text
pub fn edit_text(initial: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("q.")
        .suffix(".txt")
        .tempfile()
        .context("Failed to create temp file for editor")?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    let cmd = editor_cmd();
    let command_line = format!("{} {}", cmd.join(" "), file.path().display());
    let status = Command::new(&cmd[0])
        .args(&cmd[1..])
        .arg(file.path())
        .status()
        .map_err(|e| CommandError::EditorFailed {
            command: command_line.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(CommandError::EditorFailed {
            command: command_line,
            reason: format!("exited with {status}"),
        }
        .into());
    }

    // Re-read by path: editors may replace the file rather than write in place
    std::fs::read_to_string(file.path())
        .with_context(|| format!("Failed to read edited text from {}", file.path().display()))
}
