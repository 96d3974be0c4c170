//! Per-topic advisory file locking
//!
//! Each topic has a dedicated `.lock` file that is never replaced or
//! removed, so the data file next to it can be swapped out atomically while
//! the lock is held. Locks are `flock(2)` locks on Unix and `LockFileEx`
//! locks (via `fs2`) elsewhere; both are released when the guard drops.

use crate::io::error::QueueError;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::os::unix::io::AsRawFd;

/// Lock flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Many readers may hold the lock together
    Shared,
    /// Single writer, excludes readers
    Exclusive,
}

/// File lock guard that automatically releases on drop
pub struct FileLock {
    file: File,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = unlock(&self.file);
    }
}

/// Acquire a lock on `path`, creating the lock file if needed
///
/// With `timeout = None` the call blocks until the lock is granted. With a
/// bound, acquisition is retried with backoff (10ms doubling up to 200ms)
/// and `QueueError::LockTimeout` is returned once the bound is exceeded.
///
/// # Errors
///
/// Returns `QueueError::Io` if the lock file cannot be opened or the lock
/// syscall fails for a reason other than contention.
pub fn acquire_lock(
    path: &Path,
    mode: LockMode,
    timeout: Option<Duration>,
) -> Result<FileLock, QueueError> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| QueueError::io(path, e))?;

    let Some(limit) = timeout else {
        lock_blocking(&file, mode).map_err(|e| QueueError::io(path, e))?;
        return Ok(FileLock { file });
    };

    let start = Instant::now();
    let mut attempt: u32 = 0;
    loop {
        if try_lock(&file, mode).map_err(|e| QueueError::io(path, e))? {
            return Ok(FileLock { file });
        }

        let elapsed = start.elapsed();
        if elapsed >= limit {
            return Err(QueueError::LockTimeout {
                path: path.to_path_buf(),
                waited: elapsed,
            });
        }
        if attempt == 0 {
            tracing::warn!(path = %path.display(), ?limit, "Queue lock is busy, waiting");
        }

        let backoff = Duration::from_millis((10u64 << attempt.min(5)).min(200));
        std::thread::sleep(backoff.min(limit - elapsed));
        attempt = attempt.saturating_add(1);
    }
}

#[cfg(unix)]
fn flock_op(mode: LockMode) -> libc::c_int {
    match mode {
        LockMode::Shared => libc::LOCK_SH,
        LockMode::Exclusive => libc::LOCK_EX,
    }
}

#[cfg(unix)]
fn lock_blocking(file: &File, mode: LockMode) -> std::io::Result<()> {
    let fd = file.as_raw_fd();
    loop {
        let result = unsafe { libc::flock(fd, flock_op(mode)) };
        if result == 0 {
            return Ok(());
        }
        let err = std::io::Error::last_os_error();
        if err.kind() != std::io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Returns `Ok(false)` when another holder owns a conflicting lock.
#[cfg(unix)]
fn try_lock(file: &File, mode: LockMode) -> std::io::Result<bool> {
    let fd = file.as_raw_fd();
    loop {
        let result = unsafe { libc::flock(fd, flock_op(mode) | libc::LOCK_NB) };
        if result == 0 {
            return Ok(true);
        }

        let err = std::io::Error::last_os_error();
        match err.raw_os_error() {
            Some(code) if code == libc::EWOULDBLOCK || code == libc::EAGAIN => return Ok(false),
            Some(code) if code == libc::EINTR => continue,
            _ => return Err(err),
        }
    }
}

#[cfg(unix)]
fn unlock(file: &File) -> std::io::Result<()> {
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_UN) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn lock_blocking(file: &File, mode: LockMode) -> std::io::Result<()> {
    use fs2::FileExt;
    match mode {
        LockMode::Shared => file.lock_shared(),
        LockMode::Exclusive => file.lock_exclusive(),
    }
}

#[cfg(not(unix))]
fn try_lock(file: &File, mode: LockMode) -> std::io::Result<bool> {
    use fs2::FileExt;
    let result = match mode {
        LockMode::Shared => file.try_lock_shared(),
        LockMode::Exclusive => file.try_lock_exclusive(),
    };
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(not(unix))]
fn unlock(file: &File) -> std::io::Result<()> {
    fs2::FileExt::unlock(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_lock_success() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("test.lock");

        let lock = acquire_lock(&lock_path, LockMode::Exclusive, None).unwrap();
        assert!(lock_path.exists());
        drop(lock);
    }

    #[test]
    fn test_lock_auto_release() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("test.lock");

        {
            let _lock = acquire_lock(&lock_path, LockMode::Exclusive, None).unwrap();
        }

        // Released on drop, so a bounded attempt succeeds immediately
        let _lock2 =
            acquire_lock(&lock_path, LockMode::Exclusive, Some(Duration::ZERO)).unwrap();
    }

    #[test]
    fn test_blocking_acquire_waits_for_holder() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = Arc::new(temp_dir.path().join("test.lock"));
        let barrier = Arc::new(Barrier::new(2));

        let lock_path_clone = Arc::clone(&lock_path);
        let barrier_clone = Arc::clone(&barrier);

        let holder = thread::spawn(move || {
            let _lock = acquire_lock(&lock_path_clone, LockMode::Exclusive, None).unwrap();
            barrier_clone.wait();
            thread::sleep(Duration::from_millis(150));
        });

        barrier.wait();
        let start = Instant::now();
        let _lock = acquire_lock(&lock_path, LockMode::Exclusive, None).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(100));

        holder.join().unwrap();
    }

    #[test]
    fn test_acquire_lock_timeout() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = Arc::new(temp_dir.path().join("test.lock"));
        let barrier = Arc::new(Barrier::new(2));

        let lock_path_clone = Arc::clone(&lock_path);
        let barrier_clone = Arc::clone(&barrier);

        let holder = thread::spawn(move || {
            let _lock = acquire_lock(&lock_path_clone, LockMode::Exclusive, None).unwrap();
            barrier_clone.wait();
            thread::sleep(Duration::from_millis(500));
        });

        barrier.wait();
        let result = acquire_lock(
            &lock_path,
            LockMode::Exclusive,
            Some(Duration::from_millis(100)),
        );
        assert!(matches!(result, Err(QueueError::LockTimeout { .. })));

        holder.join().unwrap();
    }

    #[test]
    fn test_shared_locks_coexist() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("test.lock");

        let _first = acquire_lock(&lock_path, LockMode::Shared, None).unwrap();
        let second = acquire_lock(&lock_path, LockMode::Shared, Some(Duration::ZERO));
        assert!(second.is_ok());
    }

    #[test]
    fn test_shared_lock_excludes_writer() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("test.lock");

        let _reader = acquire_lock(&lock_path, LockMode::Shared, None).unwrap();
        let writer = acquire_lock(
            &lock_path,
            LockMode::Exclusive,
            Some(Duration::from_millis(50)),
        );
        assert!(matches!(writer, Err(QueueError::LockTimeout { .. })));
    }
}
