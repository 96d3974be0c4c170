//! Queue topic derivation from git repository state
//!
//! The topic is `<first remote>:<current branch>`, or whichever of the two
//! is available. All git calls are local and never touch the network.

use crate::commands::error::CommandError;
use std::path::Path;
use std::process::Command;

/// Run git in `cwd` and return trimmed stdout on success.
///
/// Returns `None` on any failure (git not found, not a repo, etc.).
fn git_output(cwd: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let s = String::from_utf8(output.stdout).ok()?;
    Some(s.trim().to_string())
}

pub fn is_in_git_worktree(cwd: &Path) -> bool {
    git_output(cwd, &["rev-parse", "--is-inside-work-tree"]).as_deref() == Some("true")
}

/// Name of the first configured remote
pub fn first_remote(cwd: &Path) -> Option<String> {
    git_output(cwd, &["remote"])?
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Current branch; `None` when detached
pub fn current_branch(cwd: &Path) -> Option<String> {
    let branch = git_output(cwd, &["branch", "--show-current"])?;
    if branch.is_empty() || branch == "HEAD" {
        None
    } else {
        Some(branch)
    }
}

/// Combine remote and branch into a topic string
pub fn combine_topic(remote: Option<&str>, branch: Option<&str>) -> Option<String> {
    match (remote, branch) {
        (Some(r), Some(b)) => Some(format!("{r}:{b}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

/// Derive the queue topic for the repository containing `cwd`
pub fn derive_topic(cwd: &Path) -> Result<String, CommandError> {
    if !is_in_git_worktree(cwd) {
        return Err(CommandError::NoGitContext(
            "not in a git worktree (cannot derive topic)".to_string(),
        ));
    }

    let remote = first_remote(cwd);
    let branch = current_branch(cwd);
    combine_topic(remote.as_deref(), branch.as_deref()).ok_or_else(|| {
        CommandError::NoGitContext("cannot derive topic (no remote and no branch)".to_string())
    })
}
