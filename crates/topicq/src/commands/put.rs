//! Put command implementation

use anyhow::Result;
use clap::Args;
use topicq_core::config::QueueSettings;

use super::Outcome;
use crate::util::editor::edit_text;
use crate::util::topic::{normalize_topic, split_topic_and_body};

/// Compose a message in $EDITOR and enqueue it
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Queue topic; if omitted, the first line of the edited text is the topic
    topic: Option<String>,
}

/// Execute the put command, printing the new message id
pub fn execute(args: PutArgs, settings: &QueueSettings) -> Result<Outcome> {
    let (topic, body) = match args.topic {
        Some(ref raw) => {
            let topic = normalize_topic(raw)?;
            (topic, edit_text("")?)
        }
        None => split_topic_and_body(&edit_text("")?)?,
    };

    let message = settings.store().put(&topic, body)?;
    println!("{}", message.id);
    Ok(Outcome::Done)
}
