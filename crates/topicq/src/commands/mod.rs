//! CLI command dispatch and execution

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use topicq_core::config::{ConfigOverrides, QueueSettings, resolve_config};
use topicq_core::home::get_home_dir;

use crate::util::parse_secs;

mod del;
mod edit;
pub mod error;
mod get;
mod git;
mod list;
mod peek;
mod put;
mod readto;
mod replace;

/// q - Topic-based queues (file-backed, flock-locked)
#[derive(Parser, Debug)]
#[command(
    name = "q",
    version,
    about = "Topic-based queues (file-backed, flock-locked)",
    long_about = "Topic-keyed FIFO queues stored as one JSON file per topic, safe for \
                  concurrent use by many processes without a daemon"
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args, Debug)]
struct GlobalArgs {
    /// Storage directory (overrides Q_DIR, config file and XDG_STATE_HOME)
    #[arg(long, global = true, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Config file (default: ~/.config/q/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Give up waiting for a busy topic lock after SECS
    #[arg(long, global = true, value_name = "SECS", value_parser = parse_secs)]
    lock_timeout: Option<Duration>,
}

impl GlobalArgs {
    fn settings(&self, poll_interval: Option<Duration>) -> Result<QueueSettings> {
        let home_dir = get_home_dir()?;
        let overrides = ConfigOverrides {
            base_dir: self.base_dir.clone(),
            poll_interval,
            lock_timeout: self.lock_timeout,
            config_path: self.config.clone(),
        };
        Ok(resolve_config(&overrides, &home_dir)?)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open $EDITOR, enqueue the message (first line is the topic if omitted)
    Put(put::PutArgs),

    /// Read stdin, enqueue the message (first line is the topic if omitted)
    Readto(readto::ReadtoArgs),

    /// Dequeue the first message to stdout
    Get(get::GetArgs),

    /// Print a message without removing it
    Peek(peek::PeekArgs),

    /// List messages with id and a one-line summary
    List(list::ListArgs),

    /// Delete a message by id
    Del(del::DelArgs),

    /// Open a message in $EDITOR, then replace it
    Edit(edit::EditArgs),

    /// Replace a message's content from stdin
    Replace(replace::ReplaceArgs),

    /// Queue operations on the topic derived from git remote:branch
    Git(git::GitArgs),
}

/// Successful command result, mapped to an exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation did what was asked
    Done,
    /// Queue was empty or the id was unknown
    Missing,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Done => 0,
            Outcome::Missing => 1,
        }
    }
}

impl Cli {
    /// Per-command `--poll`, fed into config resolution as a CLI override
    fn poll_override(&self) -> Option<Duration> {
        match self.command {
            Commands::Get(ref args) => args.poll_interval(),
            Commands::Git(ref args) => args.poll_interval(),
            _ => None,
        }
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<Outcome> {
        let settings = self.global.settings(self.poll_override())?;
        match self.command {
            Commands::Put(args) => put::execute(args, &settings),
            Commands::Readto(args) => readto::execute(args, &settings),
            Commands::Get(args) => get::execute(args, &settings),
            Commands::Peek(args) => peek::execute(args, &settings),
            Commands::List(args) => list::execute(args, &settings),
            Commands::Del(args) => del::execute(args, &settings),
            Commands::Edit(args) => edit::execute(args, &settings),
            Commands::Replace(args) => replace::execute(args, &settings),
            Commands::Git(args) => git::execute(args, &settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_flag_becomes_override() {
        let cli = Cli::try_parse_from(["q", "get", "--block", "--poll", "0.05", "work"]).unwrap();
        assert_eq!(cli.poll_override(), Some(Duration::from_millis(50)));

        let cli = Cli::try_parse_from(["q", "git", "get", "--block", "--poll", "1"]).unwrap();
        assert_eq!(cli.poll_override(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_no_poll_override_by_default() {
        let cli = Cli::try_parse_from(["q", "get", "--block", "work"]).unwrap();
        assert_eq!(cli.poll_override(), None);

        let cli = Cli::try_parse_from(["q", "list", "work"]).unwrap();
        assert_eq!(cli.poll_override(), None);
    }

    #[test]
    fn test_poll_override_reaches_settings() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            base_dir: Some(temp_dir.path().join("q")),
            poll_interval: Some(Duration::from_millis(50)),
            ..Default::default()
        };
        let settings = resolve_config(&overrides, temp_dir.path()).unwrap();
        assert_eq!(
            settings.poll_options(None).interval,
            Duration::from_millis(50)
        );
    }
}
