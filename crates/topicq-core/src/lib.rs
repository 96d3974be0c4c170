//! Core library for topicq (`q`)
//!
//! Topic-keyed FIFO queues stored as one JSON document per topic under a
//! base directory, safe for concurrent use by independent processes without
//! a daemon:
//!
//! - Every operation runs under a per-topic advisory lock
//! - Every mutation rewrites the whole document via temp file + rename
//! - Nothing is cached in memory; the filesystem is the only shared state
//!
//! ```rust,no_run
//! use topicq_core::QueueStore;
//!
//! let store = QueueStore::new("/tmp/q");
//! store.put("origin:main", "Follow up on tests").unwrap();
//! let next = store.get("origin:main").unwrap();
//! assert_eq!(next.unwrap().body, "Follow up on tests");
//! ```

pub mod config;
pub mod home;
pub mod io;
pub mod logging;
pub mod poll;
pub mod schema;
pub mod store;
pub mod text;

pub use io::QueueError;
pub use poll::{CancelToken, PollOptions, WaitResult, blocking_get};
pub use schema::{Message, QueueDocument};
pub use store::{Lookup, QueueStore};
