//! Readto command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use topicq_core::config::QueueSettings;

use super::Outcome;
use crate::util::topic::{normalize_topic, split_topic_and_body};

/// Enqueue stdin as a message
#[derive(Args, Debug)]
pub struct ReadtoArgs {
    /// Queue topic; if omitted, the first line of stdin is the topic
    topic: Option<String>,
}

/// Execute the readto command, printing the new message id
pub fn execute(args: ReadtoArgs, settings: &QueueSettings) -> Result<Outcome> {
    let store = settings.store();
    let message = match args.topic {
        Some(ref raw) => store.readto(&normalize_topic(raw)?, std::io::stdin().lock())?,
        None => {
            let text = read_stdin()?;
            let (topic, body) = split_topic_and_body(&text)?;
            store.put(&topic, body)?
        }
    };

    println!("{}", message.id);
    Ok(Outcome::Done)
}

/// Read all of stdin without modification
pub(crate) fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .lock()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}
