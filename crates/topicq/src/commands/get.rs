//! Get command implementation

use anyhow::Result;
use clap::Args;
use std::time::Duration;
use topicq_core::config::QueueSettings;
use topicq_core::{CancelToken, WaitResult, blocking_get};

use super::Outcome;
use crate::util::topic::normalize_topic;
use crate::util::{parse_secs, print_body};

/// Dequeue the first message to stdout
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Queue topic
    topic: String,

    #[command(flatten)]
    wait: WaitArgs,
}

/// Blocking options shared with `q git get`
#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Block (poll) until a message exists
    #[arg(long)]
    block: bool,

    /// Polling interval in seconds when --block is used (default: config, 0.2)
    #[arg(long, value_name = "SECS", value_parser = parse_secs, requires = "block")]
    poll: Option<Duration>,

    /// Stop blocking after SECS and exit 1
    #[arg(long, value_name = "SECS", value_parser = parse_secs, requires = "block")]
    timeout: Option<Duration>,
}

impl GetArgs {
    /// `--poll` value, applied as a configuration override
    pub fn poll_interval(&self) -> Option<Duration> {
        self.wait.poll
    }
}

impl WaitArgs {
    pub fn poll_interval(&self) -> Option<Duration> {
        self.poll
    }
}

/// Execute the get command
pub fn execute(args: GetArgs, settings: &QueueSettings) -> Result<Outcome> {
    let topic = normalize_topic(&args.topic)?;
    dequeue(&topic, &args.wait, settings)
}

/// Pop the head of `topic`, optionally waiting for one, and print its body
pub fn dequeue(topic: &str, wait: &WaitArgs, settings: &QueueSettings) -> Result<Outcome> {
    let store = settings.store();

    let message = if wait.block {
        let options = settings.poll_options(wait.timeout);
        match blocking_get(&store, topic, &options, &CancelToken::new())? {
            WaitResult::Received(message) => Some(message),
            WaitResult::Timeout | WaitResult::Cancelled => None,
        }
    } else {
        store.get(topic)?
    };

    match message {
        Some(message) => {
            print_body(&message.body)?;
            Ok(Outcome::Done)
        }
        None => Ok(Outcome::Missing),
    }
}
