//! Schema types for persisted queues
//!
//! One JSON document per topic holds the full ordered message list.

mod message;
mod queue_document;

pub use message::Message;
pub use queue_document::{QueueDocument, DOCUMENT_VERSION};
