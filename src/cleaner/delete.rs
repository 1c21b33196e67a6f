//! Folder deletion with size accounting and a hard timeout.
//!
//! # Overview
//!
//! Deleting a folder follows a fixed sequence: measure the tree size
//! first (the tree no longer exists afterwards), then remove it on a
//! worker thread with a bounded wait. A removal that outlives the bound
//! is reported as a timeout rather than hanging the caller; the worker
//! keeps running detached, so the subtree may still disappear later.
//!
//! Deleting a path that does not exist succeeds with zero bytes freed;
//! the goal was already achieved. Lock and permission failures carry a
//! diagnostic hint from [`super::hints`].
//!
//! Batch deletion is strictly serial, and one item's failure never stops
//! the rest of the batch.
//!
//! # Example
//!
//! ```no_run
//! use spacesweep::cleaner::delete_folder;
//! use std::path::Path;
//!
//! match delete_folder(Path::new("/home/user/.gradle/caches")) {
//!     Ok(result) => println!("Freed {} bytes", result.bytes_freed),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use walkdir::WalkDir;

use super::hints::lock_hint;

/// Hard ceiling on a single folder removal.
pub const DELETE_TIMEOUT: Duration = Duration::from_secs(300);

/// Error type for folder deletion.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// The target exists but is not a directory.
    #[error("Path is not a directory")]
    NotADirectory(PathBuf),

    /// Removal exceeded [`DELETE_TIMEOUT`] and was abandoned.
    #[error("Deletion timed out. The folder may be very large or files may be locked.")]
    Timeout(PathBuf),

    /// Files under the target are locked by another process.
    #[error("Some files are locked. {hint}")]
    Locked {
        /// Target folder.
        path: PathBuf,
        /// Advice matched from the lock-hint table.
        hint: &'static str,
    },

    /// Removal failed for an I/O reason other than a lock.
    #[error("Cannot delete - files may be in use. {hint}")]
    InUse {
        /// Target folder.
        path: PathBuf,
        /// Advice matched from the lock-hint table.
        hint: &'static str,
    },

    /// The removal worker disappeared without reporting a result.
    #[error("Unexpected error: {detail}")]
    Unexpected {
        /// Target folder.
        path: PathBuf,
        /// Short category label, no internal detail.
        detail: String,
    },
}

impl DeleteError {
    /// The folder this error concerns.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotADirectory(p) | Self::Timeout(p) => p,
            Self::Locked { path, .. } | Self::InUse { path, .. } | Self::Unexpected { path, .. } => {
                path
            }
        }
    }
}

/// Result of a successful folder deletion.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Folder that was removed.
    pub path: PathBuf,
    /// Bytes measured under the tree before removal.
    pub bytes_freed: u64,
    /// False when the folder was already absent (no-op success).
    pub existed: bool,
}

/// A failed item within a batch, preserving its identity.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// Folder that failed to delete.
    pub path: PathBuf,
    /// Display form of the failure.
    pub message: String,
}

/// Results of a batch deletion.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted folders.
    pub successes: Vec<DeleteResult>,
    /// Failed folders with their messages.
    pub failures: Vec<BatchFailure>,
    /// Total bytes freed across all successes.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of attempted deletions.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Check whether every item succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the batch.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Deleted {} folder(s), freed {} bytes",
                self.success_count(),
                self.bytes_freed
            )
        } else {
            format!(
                "Deleted {} folder(s), {} failed, freed {} bytes",
                self.success_count(),
                self.failure_count(),
                self.bytes_freed
            )
        }
    }
}

/// Callback trait for batch deletion progress.
pub trait DeleteProgressCallback: Send + Sync {
    /// Called before each deletion starts. `index` counts from 1, matching
    /// "processing item N of M".
    fn on_folder_start(&self, path: &Path, index: usize, total: usize);

    /// Called after a successful deletion.
    fn on_folder_success(&self, path: &Path, bytes_freed: u64);

    /// Called after a failed deletion.
    fn on_folder_failure(&self, path: &Path, error: &str);

    /// Called once the whole batch has been processed.
    fn on_complete(&self, result: &BatchDeleteResult);
}

/// Sum of file sizes under a tree, best-effort.
///
/// Unreadable entries contribute zero. Symlinks are not followed, so the
/// total reflects what removal will actually free.
#[must_use]
pub fn folder_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

fn map_removal_error(path: &Path, error: &io::Error) -> DeleteError {
    let hint = lock_hint(path);
    match error.kind() {
        io::ErrorKind::PermissionDenied => DeleteError::Locked {
            path: path.to_path_buf(),
            hint,
        },
        _ => DeleteError::InUse {
            path: path.to_path_buf(),
            hint,
        },
    }
}

/// Remove a tree on a worker thread, waiting at most `timeout`.
///
/// On timeout the worker is left running detached (there is no safe way
/// to stop it) and the caller gets a clean failure instead of a hang.
fn remove_tree_with_timeout(path: &Path, timeout: Duration) -> Result<(), DeleteError> {
    let (tx, rx) = mpsc::channel();
    let target = path.to_path_buf();

    let spawned = thread::Builder::new()
        .name("spacesweep-delete".into())
        .spawn(move || {
            // The receiver may be gone after a timeout; that is fine
            let _ = tx.send(fs::remove_dir_all(&target));
        });

    if let Err(e) = spawned {
        log::error!("Failed to spawn removal worker for {}: {}", path.display(), e);
        return Err(DeleteError::Unexpected {
            path: path.to_path_buf(),
            detail: "could not start removal worker".into(),
        });
    }

    match rx.recv_timeout(timeout) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            log::warn!("Removal failed for {}: {}", path.display(), e);
            Err(map_removal_error(path, &e))
        }
        Err(RecvTimeoutError::Timeout) => {
            log::warn!(
                "Removal of {} exceeded {}s, abandoning",
                path.display(),
                timeout.as_secs()
            );
            Err(DeleteError::Timeout(path.to_path_buf()))
        }
        Err(RecvTimeoutError::Disconnected) => Err(DeleteError::Unexpected {
            path: path.to_path_buf(),
            detail: "removal worker terminated".into(),
        }),
    }
}

/// Delete a folder and account for the space it held.
///
/// A path that does not exist is a successful no-op with zero bytes
/// freed. The tree size is measured before removal and reported as
/// `bytes_freed` on success.
///
/// # Errors
///
/// [`DeleteError::NotADirectory`] when the target is a file,
/// [`DeleteError::Timeout`] when removal exceeds [`DELETE_TIMEOUT`],
/// [`DeleteError::Locked`] or [`DeleteError::InUse`] with a diagnostic
/// hint when the filesystem refuses the removal.
pub fn delete_folder(path: &Path) -> Result<DeleteResult, DeleteError> {
    if !path.exists() {
        log::debug!("Folder already absent: {}", path.display());
        return Ok(DeleteResult {
            path: path.to_path_buf(),
            bytes_freed: 0,
            existed: false,
        });
    }

    if !path.is_dir() {
        return Err(DeleteError::NotADirectory(path.to_path_buf()));
    }

    // Measure before removing; the tree is gone afterwards
    let bytes = folder_size(path);
    log::info!("Deleting {} ({} bytes)", path.display(), bytes);

    remove_tree_with_timeout(path, DELETE_TIMEOUT)?;

    log::info!("Deleted {} ({} bytes freed)", path.display(), bytes);
    Ok(DeleteResult {
        path: path.to_path_buf(),
        bytes_freed: bytes,
        existed: true,
    })
}

/// Delete folders one at a time, continuing past failures.
///
/// Items are processed strictly in the given order. The callback's
/// `on_folder_start` fires before each deletion with a 1-based index.
/// Every failure is preserved in the returned result; none is dropped.
pub fn delete_folders_batch<C: DeleteProgressCallback>(
    paths: &[PathBuf],
    callback: Option<&C>,
) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();
    let total = paths.len();

    for (index, path) in paths.iter().enumerate() {
        if let Some(cb) = callback {
            cb.on_folder_start(path, index + 1, total);
        }

        match delete_folder(path) {
            Ok(receipt) => {
                result.bytes_freed += receipt.bytes_freed;
                if let Some(cb) = callback {
                    cb.on_folder_success(path, receipt.bytes_freed);
                }
                result.successes.push(receipt);
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("Failed to delete {}: {}", path.display(), message);
                if let Some(cb) = callback {
                    cb.on_folder_failure(path, &message);
                }
                result.failures.push(BatchFailure {
                    path: path.clone(),
                    message,
                });
                // One failure never aborts the batch
            }
        }
    }

    if let Some(cb) = callback {
        cb.on_complete(&result);
    }

    log::info!("{}", result.summary());
    result
}
