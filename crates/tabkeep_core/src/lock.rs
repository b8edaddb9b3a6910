//! Exclusive lock over a state directory.
//!
//! The persisted store is a process-wide singleton: only one process may
//! write through to it at a time. The lock is an OS advisory lock on a
//! `LOCK` file that is never deleted, so a process that dies without
//! cleaning up releases it automatically and there is no stale state to
//! detect.

use crate::error::{Result, SessionError};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// RAII guard for the store lock.
///
/// While held, the `LOCK` file contains the owner's PID so a second process
/// can say who is in the way. Dropping the guard clears the PID and releases
/// the OS lock.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Acquires the lock at `lock_path`, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreLockHeld` if another handle owns the lock and has
    /// recorded its PID, or `StoreLocked` if the owner is unknown.
    pub fn acquire(lock_path: impl AsRef<Path>) -> Result<Self> {
        let path = lock_path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.kind() != fs2::lock_contended_error().kind() {
                return Err(SessionError::Io(e));
            }
            return Err(match read_owner(&mut file) {
                Some(pid) => SessionError::StoreLockHeld { pid },
                None => SessionError::StoreLocked,
            });
        }

        if let Some(pid) = read_owner(&mut file) {
            debug!(pid, "Store lock left behind by an exited process, taking over");
        }

        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        writeln!(file, "{}", std::process::id())?;
        file.flush()?;

        Ok(Self { file, path })
    }

    /// Returns the path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.set_len(0);
        let _ = FileExt::unlock(&self.file);
    }
}

/// PID recorded in the lock file, if any.
fn read_owner(file: &mut File) -> Option<u32> {
    let mut content = String::new();
    file.seek(SeekFrom::Start(0)).ok()?;
    file.read_to_string(&mut content).ok()?;
    content.trim().parse().ok()
}
