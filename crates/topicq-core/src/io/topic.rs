//! Topic to file path resolution
//!
//! A topic maps to `<base_dir>/<stem>.json` (data) and
//! `<base_dir>/<stem>.lock` (lock). The stem is the form-urlencoded topic,
//! which is injective, so distinct topics never share files. On top of that
//! `*` and a leading `.` are percent-encoded so the stem is a portable,
//! non-hidden file name. Stems that would exceed [`MAX_STEM_LEN`] are cut
//! and suffixed with a BLAKE3 digest of the full topic.

use crate::io::error::QueueError;
use std::path::{Path, PathBuf};

/// Longest stem kept verbatim (leaves room for suffixes under 255 bytes)
pub const MAX_STEM_LEN: usize = 180;

const TRUNCATED_PREFIX_LEN: usize = 150;
const DIGEST_HEX_LEN: usize = 32;

/// File paths for a topic's data and lock files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPaths {
    /// Queue document
    pub data: PathBuf,
    /// Lock file, never replaced or removed
    pub lock: PathBuf,
}

/// Compute the file stem for `topic`
///
/// # Errors
///
/// Returns `QueueError::InvalidTopic` for an empty topic.
pub fn topic_stem(topic: &str) -> Result<String, QueueError> {
    if topic.is_empty() {
        return Err(QueueError::InvalidTopic {
            topic: topic.to_string(),
            reason: "topic is empty".to_string(),
        });
    }

    let encoded: String = url::form_urlencoded::byte_serialize(topic.as_bytes()).collect();
    let mut stem = encoded.replace('*', "%2A");
    if stem.starts_with('.') {
        stem.replace_range(..1, "%2E");
    }

    if stem.len() > MAX_STEM_LEN {
        // Encoded output is pure ASCII, so any byte index is a char boundary
        let digest = blake3::hash(topic.as_bytes()).to_hex();
        stem = format!(
            "{}__{}",
            &stem[..TRUNCATED_PREFIX_LEN],
            &digest.as_str()[..DIGEST_HEX_LEN]
        );
    }

    Ok(stem)
}

/// Resolve the data and lock paths for `topic` under `base_dir`
pub fn paths_for_topic(base_dir: &Path, topic: &str) -> Result<TopicPaths, QueueError> {
    let stem = topic_stem(topic)?;
    Ok(TopicPaths {
        data: base_dir.join(format!("{stem}.json")),
        lock: base_dir.join(format!("{stem}.lock")),
    })
}
