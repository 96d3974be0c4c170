//! Replace command implementation

use anyhow::Result;
use clap::Args;
use topicq_core::config::QueueSettings;

use super::Outcome;
use crate::util::topic::normalize_topic;

/// Replace a message's content from stdin
#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Queue topic
    topic: String,

    /// Message id
    id: String,
}

/// Execute the replace command
pub fn execute(args: ReplaceArgs, settings: &QueueSettings) -> Result<Outcome> {
    let topic = normalize_topic(&args.topic)?;
    let replaced = settings
        .store()
        .replace(&topic, &args.id, std::io::stdin().lock())?;

    Ok(if replaced.is_some() {
        Outcome::Done
    } else {
        Outcome::Missing
    })
}
