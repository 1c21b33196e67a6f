//! Iterative directory traversal with exclusion pruning.
//!
//! # Overview
//!
//! [`FileWalker`] walks a directory tree depth-first using an explicit
//! stack, so arbitrarily deep trees never risk stack overflow. Excluded
//! directories are pruned before descent, so their contents are never
//! enumerated. Per-entry I/O errors (permissions, races with concurrent
//! deletes) are logged and skipped; a walk itself never fails.
//!
//! Cancellation is cooperative: when a shared flag is set, iteration ends
//! at the next directory or file boundary and the walker yields nothing
//! further.
//!
//! # Example
//!
//! ```no_run
//! use spacesweep::scanner::{ExclusionFilter, FileWalker};
//! use std::path::Path;
//!
//! let walker = FileWalker::new(Path::new("/home/user/Downloads"), ExclusionFilter::new());
//! for file in walker {
//!     println!("{}: {} bytes", file.path.display(), file.size);
//! }
//! ```

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{ExclusionFilter, FileRecord};

/// Depth-first file iterator over a directory tree.
///
/// Yields a [`FileRecord`] for every regular file that survives the
/// exclusion filter. Symlinks are never followed. The scan root itself is
/// not filtered; exclusion applies to entries discovered beneath it.
#[derive(Debug)]
pub struct FileWalker {
    /// Directories awaiting traversal
    stack: Vec<PathBuf>,
    /// Files from the most recently read directory, not yet yielded
    pending: VecDeque<FileRecord>,
    /// Exclusion policy applied to every discovered entry
    filter: ExclusionFilter,
    /// Optional cancellation flag shared with the caller
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl FileWalker {
    /// Create a walker rooted at the given directory.
    #[must_use]
    pub fn new(root: &Path, filter: ExclusionFilter) -> Self {
        Self {
            stack: vec![root.to_path_buf()],
            pending: VecDeque::new(),
            filter,
            cancel_flag: None,
        }
    }

    /// Attach a cancellation flag.
    ///
    /// Once the flag reads `true`, the walker stops at the next directory
    /// or file boundary and yields nothing further.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Enumerate one directory, queuing its files and stacking its
    /// subdirectories. Every failure is logged and skipped.
    fn read_directory(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Skipping unreadable directory {}: {}", dir.display(), e);
                return;
            }
        };

        for entry in entries {
            if self.is_cancelled() {
                return;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if self.filter.should_exclude(&path) {
                log::trace!("Excluded: {}", path.display());
                continue;
            }

            // DirEntry::file_type does not traverse symlinks
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    log::debug!("Skipping unstatable entry {}: {}", path.display(), e);
                    continue;
                }
            };

            if file_type.is_symlink() {
                log::trace!("Skipping symlink: {}", path.display());
            } else if file_type.is_dir() {
                self.stack.push(path);
            } else if file_type.is_file() {
                match entry.metadata() {
                    Ok(metadata) => self.pending.push_back(FileRecord::from_metadata(path, &metadata)),
                    Err(e) => {
                        log::debug!("Skipping unreadable file {}: {}", path.display(), e);
                    }
                }
            }
            // Other kinds (fifos, sockets, devices) fall through untouched
        }
    }
}

impl Iterator for FileWalker {
    type Item = FileRecord;

    fn next(&mut self) -> Option<FileRecord> {
        loop {
            if self.is_cancelled() {
                self.stack.clear();
                self.pending.clear();
                return None;
            }

            if let Some(record) = self.pending.pop_front() {
                return Some(record);
            }

            let dir = self.stack.pop()?;
            self.read_directory(&dir);
        }
    }
}
