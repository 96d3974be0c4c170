//! Queue message schema

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single enqueued message
///
/// Messages are stored in `<base_dir>/<topic-file>.json` inside the
/// `messages` array of a [`QueueDocument`](super::QueueDocument), head first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// UUID v4, unique for the topic's lifetime
    #[serde(rename = "uuid")]
    pub id: String,

    /// UTC creation time
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,

    /// UTC time of the last edit/replace, if any
    #[serde(rename = "updated", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Opaque message text
    #[serde(rename = "content")]
    pub body: String,
}

impl Message {
    /// Create a message with a fresh id stamped with the current time.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            updated_at: None,
            body: body.into(),
        }
    }

    /// Replace the body in place, keeping the id and bumping `updated_at`.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_new_has_unique_ids() {
        let a = Message::new("same");
        let b = Message::new("same");
        assert_ne!(a.id, b.id);
        assert_eq!(a.body, b.body);
        assert!(a.updated_at.is_none());
    }

    #[test]
    fn test_message_field_names_on_disk() {
        let json = r#"{
            "uuid": "0d7c1c4e-6d1f-4a52-9d0c-1f7f1d2b8f00",
            "created": "2026-02-11T14:30:00Z",
            "content": "Follow up on tests"
        }"#;

        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "0d7c1c4e-6d1f-4a52-9d0c-1f7f1d2b8f00");
        assert_eq!(msg.body, "Follow up on tests");
        assert!(msg.updated_at.is_none());

        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("uuid").is_some());
        assert!(value.get("content").is_some());
        assert!(value.get("updated").is_none());
    }

    #[test]
    fn test_set_body_keeps_id() {
        let mut msg = Message::new("before");
        let id = msg.id.clone();
        msg.set_body("after");
        assert_eq!(msg.id, id);
        assert_eq!(msg.body, "after");
        assert!(msg.updated_at.is_some());
    }

    #[test]
    fn test_message_missing_content_rejected() {
        let json = r#"{"uuid": "x", "created": "2026-02-11T14:30:00Z"}"#;
        assert!(serde_json::from_str::<Message>(json).is_err());
    }
}
