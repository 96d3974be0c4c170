//! Peek command implementation

use anyhow::Result;
use clap::Args;
use topicq_core::config::QueueSettings;

use super::Outcome;
use crate::util::print_body;
use crate::util::topic::normalize_topic;

/// Print a message without removing it
#[derive(Args, Debug)]
pub struct PeekArgs {
    /// Queue topic
    topic: String,

    /// Message id (defaults to the first message)
    id: Option<String>,
}

/// Execute the peek command
pub fn execute(args: PeekArgs, settings: &QueueSettings) -> Result<Outcome> {
    let topic = normalize_topic(&args.topic)?;
    let lookup = settings.store().peek(&topic, args.id.as_deref())?;

    match lookup.into_message() {
        Some(message) => {
            print_body(&message.body)?;
            Ok(Outcome::Done)
        }
        None => Ok(Outcome::Missing),
    }
}
