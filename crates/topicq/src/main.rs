//! q - Topic-based FIFO queues
//!
//! A thin CLI over the `topicq-core` store: file-backed, flock-locked
//! queues under `~/.local/state/q/` (or `$Q_DIR`).
//!
//! Exit codes: 0 success, 1 empty queue / unknown id / no git context,
//! 2 any other error.

use clap::Parser;

mod commands;
mod util;

use commands::Cli;
use commands::error::CommandError;

fn main() {
    topicq_core::logging::init();
    let cli = Cli::parse();

    let code = match cli.execute() {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("q: {e:#}");
            e.downcast_ref::<CommandError>()
                .map_or(2, CommandError::exit_code)
        }
    };
    std::process::exit(code);
}
