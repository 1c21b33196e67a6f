//! Scanner module for filesystem traversal and file metadata.
//!
//! This module provides the building blocks the discovery engines are
//! assembled from:
//! - [`walker`]: iterative directory traversal with exclusion pruning
//! - [`exclude`]: the system-path exclusion predicate
//! - [`hasher`]: streaming BLAKE3 content digests
//! - [`classify`]: extension-based file type labels
//!
//! # Example
//!
//! ```no_run
//! use spacesweep::scanner::{ExclusionFilter, FileWalker};
//! use std::path::Path;
//!
//! let walker = FileWalker::new(Path::new("/data"), ExclusionFilter::new());
//! for file in walker {
//!     println!("{}: {} bytes", file.path.display(), file.size);
//! }
//! ```

pub mod classify;
pub mod exclude;
pub mod hasher;
pub mod walker;

use std::fs::Metadata;
use std::path::PathBuf;
use std::time::SystemTime;

// Re-export main types
pub use classify::FileKind;
pub use exclude::ExclusionFilter;
pub use hasher::{hash_file, hash_to_hex, try_hash_file, Hash, HashError, HASH_CHUNK_SIZE};
pub use walker::FileWalker;

/// Metadata for a discovered file.
///
/// Produced by the walker and owned by whichever result collection
/// (duplicate group or large-file list) ends up holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
    /// Creation time, where the platform reports one
    pub created: Option<SystemTime>,
}

impl FileRecord {
    /// Create a new record with no creation time.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        Self {
            path,
            size,
            modified,
            created: None,
        }
    }

    /// Build a record from a path and its metadata.
    ///
    /// The creation time is best-effort: filesystems that do not track it
    /// simply leave it absent.
    #[must_use]
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        Self {
            path,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            created: metadata.created().ok(),
        }
    }

    /// The file name component, lossily converted for display.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Errors that can occur when validating a scan or deletion target.
///
/// Per-entry errors inside a walk are never surfaced through this type;
/// the walker swallows them and moves on.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a path.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
