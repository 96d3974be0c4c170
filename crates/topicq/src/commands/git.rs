//! Git command implementation
//!
//! Same queue operations, with the topic derived from the current
//! repository as `<first remote>:<current branch>`.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::time::Duration;
use topicq_core::config::QueueSettings;
use tracing::debug;

use super::Outcome;
use super::get::{WaitArgs, dequeue};
use super::readto::read_stdin;
use crate::util::editor::edit_text;
use crate::util::git::derive_topic;

/// Queue operations on the topic derived from git remote:branch
#[derive(Args, Debug)]
pub struct GitArgs {
    #[command(subcommand)]
    command: GitCommand,
}

#[derive(Subcommand, Debug)]
enum GitCommand {
    /// Open $EDITOR, enqueue the message on the repository topic
    Put,

    /// Read stdin, enqueue the message on the repository topic
    Readto,

    /// Dequeue the first message of the repository topic
    Get(WaitArgs),
}

impl GitArgs {
    /// `--poll` value of `git get`, applied as a configuration override
    pub fn poll_interval(&self) -> Option<Duration> {
        match self.command {
            GitCommand::Get(ref wait) => wait.poll_interval(),
            GitCommand::Put | GitCommand::Readto => None,
        }
    }
}

/// Execute the git command
pub fn execute(args: GitArgs, settings: &QueueSettings) -> Result<Outcome> {
    let cwd = std::env::current_dir()?;
    let topic = derive_topic(&cwd)?;
    debug!(topic = %topic, "derived git topic");

    let store = settings.store();
    match args.command {
        GitCommand::Put => {
            let message = store.put(&topic, edit_text("")?)?;
            println!("{}", message.id);
            Ok(Outcome::Done)
        }
        GitCommand::Readto => {
            let message = store.put(&topic, read_stdin()?)?;
            println!("{}", message.id);
            Ok(Outcome::Done)
        }
        GitCommand::Get(wait) => dequeue(&topic, &wait, settings),
    }
}
