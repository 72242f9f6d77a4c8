//! Directory locking
//!
//! Each open store holds an exclusive advisory lock (fs2) on
//! `<dir>/LOCK`. The lock is per open file, so a second store on the same
//! directory is refused whether it lives in this process or another one.
//!
//! The lock is released on Drop.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{PathKvError, Result};

const LOCK_FILENAME: &str = "LOCK";

/// Exclusive hold on a store directory
#[derive(Debug)]
pub struct DirLock {
    file: File,
    path: PathBuf,
}

impl DirLock {
    /// Try to take the lock on `dir` without blocking
    ///
    /// Fails with [`PathKvError::PathInUse`] if another holder has it.
    pub fn try_acquire(dir: &Path) -> Result<Self> {
        let path = dir.join(LOCK_FILENAME);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                PathKvError::Initialization(format!(
                    "cannot open lock file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        if file.try_lock_exclusive().is_err() {
            return Err(PathKvError::PathInUse(dir.to_path_buf()));
        }

        tracing::debug!(path = %path.display(), "directory lock acquired");
        Ok(Self { file, path })
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        // unlock errors on drop are ignored; closing the file releases it anyway
        let _ = self.file.unlock();
    }
}
