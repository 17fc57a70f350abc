//! Scoped changes of the process-wide working directory
//!
//! The current directory is a single attribute of the whole process, so every
//! change goes through one global lock and is undone when the guard drops.

use crate::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

static DIRECTORY_LOCK: Mutex<()> = Mutex::new(());

/// Holds the directory lock and the directory to return to
pub struct WorkingDirGuard {
    previous: PathBuf,
    // Released after `drop` has restored `previous`
    _lock: MutexGuard<'static, ()>,
}

impl WorkingDirGuard {
    /// Lock the working directory and change into `dir`
    pub fn enter(dir: &Path) -> Result<Self> {
        // A panic while the lock was held already restored the directory in Drop
        let lock = DIRECTORY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        debug!("Changed working directory: {} -> {}", previous.display(), dir.display());

        Ok(Self {
            previous,
            _lock: lock,
        })
    }

    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            warn!(
                "Failed to restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
