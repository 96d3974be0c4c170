//! File primitives for queue storage
//!
//! This module provides the building blocks the [`QueueStore`](crate::store::QueueStore)
//! composes into locked read-modify-write cycles:
//!
//! - **Topic paths**: Collision-free mapping from topic strings to file names
//! - **File locking**: Per-topic advisory locks, shared or exclusive
//! - **Atomic replace**: Temp-file-then-rename so readers never see partial writes
//! - **Codec**: Lossless JSON encoding of a topic's full message sequence
//!
//! # Example
//!
//! ```rust,no_run
//! use topicq_core::io::{acquire_lock, atomic_replace, codec, paths_for_topic, LockMode};
//! use topicq_core::Message;
//! use std::path::Path;
//!
//! let paths = paths_for_topic(Path::new("/tmp/q"), "origin:main").unwrap();
//! let _lock = acquire_lock(&paths.lock, LockMode::Exclusive, None).unwrap();
//! let bytes = codec::encode("origin:main", &[Message::new("hello")]).unwrap();
//! atomic_replace(&paths.data, &bytes).unwrap();
//! ```

pub mod atomic;
pub mod codec;
pub mod error;
pub mod lock;
pub mod topic;

// Re-export primary API
pub use atomic::atomic_replace;
pub use error::QueueError;
pub use lock::{acquire_lock, FileLock, LockMode};
pub use topic::{paths_for_topic, topic_stem, TopicPaths};
