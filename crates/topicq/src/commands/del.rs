//! Del command implementation

use anyhow::Result;
use clap::Args;
use topicq_core::config::QueueSettings;

use super::Outcome;
use crate::util::topic::normalize_topic;

/// Delete a message by id
#[derive(Args, Debug)]
pub struct DelArgs {
    /// Queue topic
    topic: String,

    /// Message id
    id: String,
}

/// Execute the del command
pub fn execute(args: DelArgs, settings: &QueueSettings) -> Result<Outcome> {
    let topic = normalize_topic(&args.topic)?;
    if settings.store().delete(&topic, &args.id)? {
        Ok(Outcome::Done)
    } else {
        Ok(Outcome::Missing)
    }
}
