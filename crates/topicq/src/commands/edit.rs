//! Edit command implementation

use anyhow::Result;
use clap::Args;
use topicq_core::config::QueueSettings;
use tracing::warn;

use super::Outcome;
use crate::util::editor::edit_text;
use crate::util::topic::normalize_topic;

/// Open a message in $EDITOR, then replace it
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Queue topic
    topic: String,

    /// Message id
    id: String,
}

/// Execute the edit command
///
/// No lock is held while the editor runs. If the message is removed in the
/// meantime the edited text is printed to stderr so it can be recovered.
pub fn execute(args: EditArgs, settings: &QueueSettings) -> Result<Outcome> {
    let topic = normalize_topic(&args.topic)?;
    let store = settings.store();

    let Some(current) = store.peek(&topic, Some(&args.id))?.into_message() else {
        return Ok(Outcome::Missing);
    };
    let edited = edit_text(&current.body)?;

    if store.edit(&topic, &args.id, edited.as_str())?.is_some() {
        return Ok(Outcome::Done);
    }

    warn!(topic = %topic, id = %args.id, "Message vanished while editing");
    eprintln!("q edit: message changed before replace; edits discarded");
    eprintln!("--- edited text ---");
    eprint!("{edited}");
    if !edited.is_empty() && !edited.ends_with('\n') {
        eprintln!();
    }
    Ok(Outcome::Missing)
}
