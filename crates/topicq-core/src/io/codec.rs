//! Queue document encoding
//!
//! Documents are pretty-printed JSON with a trailing newline. Decoding also
//! accepts a bare message array, the layout older queue files used.

use crate::schema::{DOCUMENT_VERSION, Message, QueueDocument};
use serde::Deserialize;
use serde::de::Error as _;

#[derive(Deserialize)]
#[serde(untagged)]
enum Persisted {
    Document(QueueDocument),
    Bare(Vec<Message>),
}

/// Encode the full message sequence of `topic`
pub fn encode(topic: &str, messages: &[Message]) -> Result<Vec<u8>, serde_json::Error> {
    let doc = QueueDocument::new(topic, messages.to_vec());
    let mut out = serde_json::to_vec_pretty(&doc)?;
    out.push(b'\n');
    Ok(out)
}

/// Decode a persisted document into its message sequence
///
/// Malformed input is always an error: an empty or truncated file is never
/// read as an empty queue.
pub fn decode(bytes: &[u8]) -> Result<Vec<Message>, serde_json::Error> {
    match serde_json::from_slice::<Persisted>(bytes)? {
        Persisted::Document(doc) if doc.version > DOCUMENT_VERSION => Err(
            serde_json::Error::custom(format!("unsupported queue document version {}", doc.version)),
        ),
        Persisted::Document(doc) => Ok(doc.messages),
        Persisted::Bare(messages) => Ok(messages),
    }
}
