//! Topic-keyed FIFO queue store
//!
//! Every operation is one locked cycle over a single topic document:
//!
//! 1. Acquire the topic lock (exclusive for mutations, shared for reads)
//! 2. Read and decode the current document (missing file = empty queue)
//! 3. Apply the change in memory
//! 4. Encode and atomically replace the document, only if something changed
//! 5. Release the lock on drop, on every exit path
//!
//! No state is cached between calls; the file on disk is the only shared
//! state, so any number of processes can use the same base directory.

use crate::io::{
    LockMode, QueueError, TopicPaths, acquire_lock, atomic_replace, codec, paths_for_topic,
};
use crate::schema::Message;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Result of a `peek`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Head message, or the message with the requested id
    Found(Message),
    /// No id given and the queue holds no messages
    Empty,
    /// An id was given and no message carries it
    NotFound,
}

impl Lookup {
    /// Convert into the found message, if any
    pub fn into_message(self) -> Option<Message> {
        match self {
            Lookup::Found(m) => Some(m),
            Lookup::Empty | Lookup::NotFound => None,
        }
    }
}

/// File-backed queue store rooted at a base directory
#[derive(Debug, Clone)]
pub struct QueueStore {
    base_dir: PathBuf,
    lock_timeout: Option<Duration>,
}

impl QueueStore {
    /// Create a store; the directory is created lazily on first use
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            lock_timeout: None,
        }
    }

    /// Bound lock acquisition; `None` (the default) waits indefinitely
    pub fn with_lock_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve the data and lock file paths for `topic`
    pub fn paths_for_topic(&self, topic: &str) -> Result<TopicPaths, QueueError> {
        paths_for_topic(&self.base_dir, topic)
    }

    /// Append a new message to the tail of `topic`
    pub fn put(&self, topic: &str, body: impl Into<String>) -> Result<Message, QueueError> {
        let message = Message::new(body);
        let appended = message.clone();
        self.mutate(topic, move |messages| {
            messages.push(appended);
            Some(())
        })?;
        debug!(topic, id = %message.id, "Enqueued message");
        Ok(message)
    }

    /// Append a message whose body is read from `reader`
    ///
    /// The stream is drained before the lock is taken.
    pub fn readto(&self, topic: &str, reader: impl Read) -> Result<Message, QueueError> {
        let body = read_body(reader)?;
        self.put(topic, body)
    }

    /// Remove and return the head of `topic`; `None` when the queue is empty
    pub fn get(&self, topic: &str) -> Result<Option<Message>, QueueError> {
        let popped = self.mutate(topic, |messages| {
            if messages.is_empty() {
                None
            } else {
                Some(messages.remove(0))
            }
        })?;
        if let Some(ref m) = popped {
            debug!(topic, id = %m.id, "Dequeued message");
        }
        Ok(popped)
    }

    /// Return the head, or the message with `id`, without changing anything
    pub fn peek(&self, topic: &str, id: Option<&str>) -> Result<Lookup, QueueError> {
        let messages = self.read(topic)?;
        let lookup = match id {
            Some(id) => messages
                .into_iter()
                .find(|m| m.id == id)
                .map_or(Lookup::NotFound, Lookup::Found),
            None => messages
                .into_iter()
                .next()
                .map_or(Lookup::Empty, Lookup::Found),
        };
        Ok(lookup)
    }

    /// Snapshot of all messages in `topic`, head first
    pub fn list(&self, topic: &str) -> Result<Vec<Message>, QueueError> {
        self.read(topic)
    }

    /// Remove the message with `id`; returns `false` if no such message
    pub fn delete(&self, topic: &str, id: &str) -> Result<bool, QueueError> {
        let removed = self.mutate(topic, |messages| {
            let index = messages.iter().position(|m| m.id == id)?;
            Some(messages.remove(index))
        })?;
        debug!(topic, id, found = removed.is_some(), "Delete by id");
        Ok(removed.is_some())
    }

    /// Replace the body of the message with `id`, keeping its id and position
    ///
    /// Returns `None` if no such message exists; the queue is then untouched.
    pub fn edit(
        &self,
        topic: &str,
        id: &str,
        body: impl Into<String>,
    ) -> Result<Option<Message>, QueueError> {
        let body = body.into();
        let edited = self.mutate(topic, |messages| {
            let message = messages.iter_mut().find(|m| m.id == id)?;
            message.set_body(body);
            Some(message.clone())
        })?;
        debug!(topic, id, found = edited.is_some(), "Edit by id");
        Ok(edited)
    }

    /// Same as [`edit`](Self::edit), with the new body read from `reader`
    pub fn replace(
        &self,
        topic: &str,
        id: &str,
        reader: impl Read,
    ) -> Result<Option<Message>, QueueError> {
        let body = read_body(reader)?;
        self.edit(topic, id, body)
    }

    /// Locked read-only snapshot
    fn read(&self, topic: &str) -> Result<Vec<Message>, QueueError> {
        let paths = self.paths_for_topic(topic)?;
        self.ensure_base_dir()?;
        let _lock = acquire_lock(&paths.lock, LockMode::Shared, self.lock_timeout)?;
        load_messages(&paths.data)
    }

    /// Locked read-modify-write cycle
    ///
    /// `modify_fn` returns `Some` when it changed the messages, which
    /// triggers the write, or `None` to leave the document untouched.
    fn mutate<T, F>(&self, topic: &str, modify_fn: F) -> Result<Option<T>, QueueError>
    where
        F: FnOnce(&mut Vec<Message>) -> Option<T>,
    {
        let paths = self.paths_for_topic(topic)?;
        self.ensure_base_dir()?;
        let _lock = acquire_lock(&paths.lock, LockMode::Exclusive, self.lock_timeout)?;

        let mut messages = load_messages(&paths.data)?;
        let Some(result) = modify_fn(&mut messages) else {
            return Ok(None);
        };

        let content =
            codec::encode(topic, &messages).map_err(|e| QueueError::io(&paths.data, e.into()))?;
        atomic_replace(&paths.data, &content)?;
        Ok(Some(result))
    }

    /// Create the base directory, tightening it to 0700 on Unix (best effort)
    fn ensure_base_dir(&self) -> Result<(), QueueError> {
        if self.base_dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.base_dir).map_err(|e| QueueError::io(&self.base_dir, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.base_dir, fs::Permissions::from_mode(0o700));
        }
        Ok(())
    }
}

/// Read a document; a missing file is an empty queue, anything unparsable
/// is `CorruptState`
fn load_messages(path: &Path) -> Result<Vec<Message>, QueueError> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(QueueError::io(path, e)),
    };
    codec::decode(&content).map_err(|e| QueueError::CorruptState {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_body(mut reader: impl Read) -> Result<String, QueueError> {
    let mut body = String::new();
    reader
        .read_to_string(&mut body)
        .map_err(|e| QueueError::io("<input>", e))?;
    Ok(body)
}
