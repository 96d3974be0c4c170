//! Integration tests for `q git` topic derivation

use assert_cmd::cargo;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(cwd: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_CEILING_DIRECTORIES", cwd.parent().unwrap())
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed");
}

fn q(temp_dir: &TempDir, cwd: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("q");
    cmd.env("Q_HOME", temp_dir.path())
        .env("Q_DIR", temp_dir.path().join("queues"))
        .env("GIT_CEILING_DIRECTORIES", temp_dir.path())
        .current_dir(cwd);
    cmd
}

#[test]
fn test_git_readto_and_get_use_remote_branch_topic() {
    if !git_available() {
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let repo = temp_dir.path().join("repo");
    std::fs::create_dir_all(&repo).unwrap();
    git(&repo, &["init", "-q"]);
    git(&repo, &["symbolic-ref", "HEAD", "refs/heads/feature"]);
    git(&repo, &["remote", "add", "origin", "https://example.invalid/repo.git"]);

    q(&temp_dir, &repo)
        .args(["git", "readto"])
        .write_stdin("branch note\n")
        .assert()
        .success();

    q(&temp_dir, &repo)
        .args(["get", "origin:feature"])
        .assert()
        .success()
        .stdout("branch note\n");

    q(&temp_dir, &repo)
        .args(["git", "get"])
        .assert()
        .code(1);
}

#[test]
fn test_git_outside_repo_exits_1() {
    let temp_dir = TempDir::new().unwrap();
    let plain = temp_dir.path().join("plain");
    std::fs::create_dir_all(&plain).unwrap();

    q(&temp_dir, &plain)
        .args(["git", "get"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not in a git worktree"));
}
