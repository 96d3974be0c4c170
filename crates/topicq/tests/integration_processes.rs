//! Concurrent `q` processes sharing one queue directory

use assert_cmd::cargo;
use std::collections::HashSet;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

const PRODUCERS: usize = 16;

fn q_process(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_q"));
    cmd.env("Q_HOME", temp_dir.path())
        .env("Q_DIR", temp_dir.path().join("queues"))
        .env_remove("Q_LOCK_TIMEOUT_MS");
    cmd
}

#[test]
fn test_concurrent_readto_processes_lose_nothing() {
    let temp_dir = TempDir::new().unwrap();

    // Start every producer before feeding any stdin so the writes overlap
    let mut children: Vec<_> = (0..PRODUCERS)
        .map(|_| {
            q_process(&temp_dir)
                .args(["readto", "shared"])
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .spawn()
                .unwrap()
        })
        .collect();

    for (i, child) in children.iter_mut().enumerate() {
        let mut stdin = child.stdin.take().unwrap();
        write!(stdin, "job-{i}").unwrap();
    }

    let ids: HashSet<String> = children
        .into_iter()
        .map(|child| {
            let output = child.wait_with_output().unwrap();
            assert!(output.status.success());
            String::from_utf8(output.stdout).unwrap().trim().to_string()
        })
        .collect();
    assert_eq!(ids.len(), PRODUCERS);

    let output = cargo::cargo_bin_cmd!("q")
        .env("Q_HOME", temp_dir.path())
        .env("Q_DIR", temp_dir.path().join("queues"))
        .args(["list", "--json", "shared"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed["count"], PRODUCERS);
    let stored: HashSet<String> = listed["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["uuid"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(stored, ids);
}

#[test]
fn test_concurrent_get_processes_never_share_a_message() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..PRODUCERS {
        let status = q_process(&temp_dir)
            .args(["readto", "jobs"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .and_then(|mut child| {
                child.stdin.take().unwrap().write_all(format!("job-{i}").as_bytes())?;
                child.wait()
            })
            .unwrap();
        assert!(status.success());
    }

    let consumers: Vec<_> = (0..PRODUCERS)
        .map(|_| {
            q_process(&temp_dir)
                .args(["get", "jobs"])
                .stdout(Stdio::piped())
                .spawn()
                .unwrap()
        })
        .collect();

    let received: Vec<String> = consumers
        .into_iter()
        .map(|child| {
            let output = child.wait_with_output().unwrap();
            assert!(output.status.success());
            String::from_utf8(output.stdout).unwrap()
        })
        .collect();

    let unique: HashSet<&String> = received.iter().collect();
    assert_eq!(unique.len(), PRODUCERS);
    let expected: HashSet<String> = (0..PRODUCERS).map(|i| format!("job-{i}")).collect();
    assert_eq!(received.into_iter().collect::<HashSet<_>>(), expected);
}
