//! Error types for command execution

use thiserror::Error;

/// Command execution errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// Topic argument or first input line is blank
    #[error("topic is empty")]
    EmptyTopic,

    /// Editor could not be started or exited unsuccessfully
    #[error("editor failed: {command}: {reason}")]
    EditorFailed { command: String, reason: String },

    /// Topic could not be derived from the git repository
    #[error("git: {0}")]
    NoGitContext(String),

    /// Invalid duration argument
    #[error("invalid duration {0:?}: expected seconds")]
    InvalidDuration(String),
}

impl CommandError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::NoGitContext(_) => 1,
            _ => 2,
        }
    }
}
