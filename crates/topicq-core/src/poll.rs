//! Blocking dequeue by polling
//!
//! [`blocking_get`] repeats short, fully locked [`QueueStore::get`] calls
//! until a message arrives, the optional timeout passes, or the caller
//! cancels. No lock is held between attempts, so other processes can put
//! and get freely while someone is waiting.
//!
//! With [`PollOptions::watch`] enabled, the pause between attempts ends
//! early when the topic file changes (inotify/FSEvents via `notify`). Every
//! attempt re-reads the full document, so a wakeup can never be missed; the
//! watch only shortens latency. If the watcher cannot be created the loop
//! falls back to plain sleeps.

use crate::io::QueueError;
use crate::schema::Message;
use crate::store::QueueStore;
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::{Duration, Instant};

/// Default pause between attempts
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Polling behaviour for [`blocking_get`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// Pause between attempts
    pub interval: Duration,
    /// Give up after this long; `None` waits until cancelled
    pub timeout: Option<Duration>,
    /// End pauses early on filesystem change notifications
    pub watch: bool,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            watch: true,
        }
    }
}

/// Cooperative cancellation flag, shareable across threads
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the waiter stops before its next attempt
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of waiting for a message
#[derive(Debug, PartialEq, Eq)]
pub enum WaitResult {
    /// A message was dequeued
    Received(Message),
    /// Timeout expired with the queue still empty
    Timeout,
    /// The caller cancelled the wait
    Cancelled,
}

/// Dequeue the head of `topic`, waiting for one to appear
///
/// # Errors
///
/// `CorruptState`, `Io` and `LockTimeout` from any attempt end the wait and
/// are returned unchanged; only an empty queue is retried.
pub fn blocking_get(
    store: &QueueStore,
    topic: &str,
    options: &PollOptions,
    cancel: &CancelToken,
) -> Result<WaitResult, QueueError> {
    let start = Instant::now();
    let mut pause_source: Option<Pause> = None;

    loop {
        if cancel.is_cancelled() {
            return Ok(WaitResult::Cancelled);
        }
        if let Some(message) = store.get(topic)? {
            return Ok(WaitResult::Received(message));
        }

        let mut pause = options.interval;
        if let Some(limit) = options.timeout {
            let elapsed = start.elapsed();
            if elapsed >= limit {
                return Ok(WaitResult::Timeout);
            }
            pause = pause.min(limit - elapsed);
        }

        // Created after the first attempt, which guarantees the base dir exists
        let source = pause_source.get_or_insert_with(|| {
            if options.watch {
                Pause::watch(store, topic)
            } else {
                Pause::Sleep
            }
        });
        source.wait(pause);
    }
}

/// How the poller spends the time between attempts
enum Pause {
    Sleep,
    Watch {
        rx: Receiver<()>,
        // Kept alive for the duration of the wait
        _watcher: RecommendedWatcher,
    },
}

impl Pause {
    fn watch(store: &QueueStore, topic: &str) -> Self {
        match try_watch(store, topic) {
            Ok(pause) => pause,
            Err(e) => {
                tracing::warn!(error = %e, "File watching failed, falling back to polling");
                Pause::Sleep
            }
        }
    }

    fn wait(&mut self, pause: Duration) {
        let disconnected = match self {
            Pause::Sleep => {
                std::thread::sleep(pause);
                false
            }
            Pause::Watch { rx, .. } => match rx.recv_timeout(pause) {
                Ok(()) => {
                    // Coalesce bursts (temp file write + rename)
                    while rx.try_recv().is_ok() {}
                    false
                }
                Err(RecvTimeoutError::Timeout) => false,
                Err(RecvTimeoutError::Disconnected) => true,
            },
        };

        if disconnected {
            tracing::warn!("File watcher disconnected, falling back to polling");
            *self = Pause::Sleep;
            std::thread::sleep(pause);
        }
    }
}

fn try_watch(store: &QueueStore, topic: &str) -> Result<Pause, Box<dyn std::error::Error>> {
    let data_path = store.paths_for_topic(topic)?.data;
    let data_name: OsString = data_path
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or("queue path has no file name")?;
    let dir = data_path.parent().unwrap_or(Path::new(".")).to_path_buf();

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            let Ok(event) = res else { return };
            if matches!(event.kind, EventKind::Access(_)) {
                return;
            }
            if event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(data_name.as_os_str()))
            {
                let _ = tx.send(());
            }
        },
        NotifyConfig::default(),
    )?;
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    Ok(Pause::Watch {
        rx,
        _watcher: watcher,
    })
}
