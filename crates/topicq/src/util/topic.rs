//! Topic argument handling

use crate::commands::error::CommandError;

/// Trim a topic argument, rejecting blank topics
pub fn normalize_topic(raw: &str) -> Result<String, CommandError> {
    let topic = raw.trim();
    if topic.is_empty() {
        return Err(CommandError::EmptyTopic);
    }
    Ok(topic.to_string())
}

/// Split input into topic (first line, trimmed) and body (the rest, verbatim)
pub fn split_topic_and_body(text: &str) -> Result<(String, String), CommandError> {
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    Ok((normalize_topic(first)?, rest.to_string()))
}
