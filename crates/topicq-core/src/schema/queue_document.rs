//! On-disk queue document

use super::Message;
use serde::{Deserialize, Serialize};

/// Current document format version
pub const DOCUMENT_VERSION: u32 = 1;

/// Full persisted state of one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueDocument {
    /// Format version, always [`DOCUMENT_VERSION`] when written
    pub version: u32,

    /// Topic string as given by the caller (informational)
    pub topic: String,

    /// Messages in FIFO order, head first
    pub messages: Vec<Message>,
}

impl QueueDocument {
    pub fn new(topic: &str, messages: Vec<Message>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            topic: topic.to_string(),
            messages,
        }
    }
}
