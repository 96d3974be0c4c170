//! List command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use topicq_core::config::QueueSettings;
use topicq_core::schema::Message;
use topicq_core::text::{DEFAULT_SUMMARY_WIDTH, summarize};

use super::Outcome;
use crate::util::topic::normalize_topic;

/// List messages with id and a one-line summary
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Queue topic
    topic: String,

    /// Print ids only
    #[arg(short, long, conflicts_with = "json")]
    quiet: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    topic: &'a str,
    count: usize,
    messages: &'a [Message],
}

/// Execute the list command
///
/// An empty or missing queue prints nothing and still succeeds.
pub fn execute(args: ListArgs, settings: &QueueSettings) -> Result<Outcome> {
    let topic = normalize_topic(&args.topic)?;
    let messages = settings.store().list(&topic)?;

    if args.json {
        let output = ListOutput {
            topic: &topic,
            count: messages.len(),
            messages: &messages,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(Outcome::Done);
    }

    for message in &messages {
        if args.quiet {
            println!("{}", message.id);
        } else {
            println!(
                "{} {}",
                message.id,
                summarize(&message.body, DEFAULT_SUMMARY_WIDTH)
            );
        }
    }

    Ok(Outcome::Done)
}
