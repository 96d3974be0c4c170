//! Error types for queue storage operations

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during queue operations
///
/// `Empty` and `NotFound` are ordinary results, not errors; see
/// [`QueueStore`](crate::store::QueueStore).
#[derive(Error, Debug)]
pub enum QueueError {
    /// Topic string cannot be mapped to a queue file
    #[error("Invalid topic {topic:?}: {reason}")]
    InvalidTopic { topic: String, reason: String },

    /// Persisted queue document failed to parse
    #[error("Corrupt queue file {path}: {source}")]
    CorruptState {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Bounded lock acquisition gave up
    #[error("Failed to acquire lock on {path} within {waited:?}")]
    LockTimeout { path: PathBuf, waited: Duration },
}

impl QueueError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QueueError::Io {
            path: path.into(),
            source,
        }
    }
}
