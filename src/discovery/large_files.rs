//! Large-file detection by size threshold.
//!
//! # Overview
//!
//! A single pruned walk collects every file at or above the configured
//! threshold. There is no counting pass; the total is unknown in advance,
//! so progress reports only the running count of files found. Each hit is
//! classified by extension and annotated with its age in whole days since
//! last modification. Results are sorted by size descending.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use crate::progress::ScanProgressCallback;
use crate::scanner::{ExclusionFilter, FileKind, FileRecord, FileWalker, ScanError};

/// Default inclusion threshold: 100 MiB.
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Progress is reported once per this many files found.
pub const LARGE_FILE_PROGRESS_INTERVAL: usize = 25;

const SECONDS_PER_DAY: u64 = 86_400;

/// A file at or above the scan threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargeFileRecord {
    /// Path, size, and timestamps of the file
    pub record: FileRecord,
    /// Coarse type label derived from the extension
    pub kind: FileKind,
    /// Whole days since last modification at scan time
    pub age_days: u64,
}

impl LargeFileRecord {
    /// Annotate a walked record with its type and age.
    ///
    /// A modification time in the future (clock skew) yields age zero.
    #[must_use]
    pub fn new(record: FileRecord, now: SystemTime) -> Self {
        let kind = FileKind::from_path(&record.path);
        let age_days = now
            .duration_since(record.modified)
            .map_or(0, |elapsed| elapsed.as_secs() / SECONDS_PER_DAY);
        Self {
            record,
            kind,
            age_days,
        }
    }

    /// File size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.record.size
    }

    /// File name for display.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.record.file_name()
    }
}

/// Counters describing one large-file scan.
#[derive(Debug, Clone, Default)]
pub struct LargeFileScanStats {
    /// All files the walk visited
    pub files_seen: usize,
    /// Files at or above the threshold
    pub files_found: usize,
    /// Combined size of everything found
    pub total_size: u64,
    /// Wall-clock duration of the walk
    pub scan_duration: Duration,
    /// Whether the scan stopped early on the cancel flag
    pub interrupted: bool,
}

/// Single-pass large-file scanner.
pub struct LargeFileScanner {
    threshold: u64,
    cancel_flag: Option<Arc<AtomicBool>>,
    progress: Option<Arc<dyn ScanProgressCallback>>,
}

impl fmt::Debug for LargeFileScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LargeFileScanner")
            .field("threshold", &self.threshold)
            .field("cancel_flag", &self.cancel_flag)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Default for LargeFileScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LargeFileScanner {
    /// Create a scanner with the default threshold.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_LARGE_FILE_THRESHOLD,
            cancel_flag: None,
            progress: None,
        }
    }

    /// Set the inclusion threshold in bytes.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Attach a cancellation flag shared with the caller.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// Attach a progress callback.
    ///
    /// There is no denominator for this scan; callbacks receive the
    /// running count of files found and a total of zero.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ScanProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Scan a tree for files at or above the threshold.
    ///
    /// Returns the hits sorted by size descending, along with scan
    /// statistics. Per-entry walk errors are logged and skipped.
    ///
    /// # Errors
    ///
    /// [`ScanError::NotFound`] when the root does not exist,
    /// [`ScanError::NotADirectory`] when it is not a directory.
    pub fn scan(
        &self,
        root: &Path,
    ) -> Result<(Vec<LargeFileRecord>, LargeFileScanStats), ScanError> {
        let start = Instant::now();
        let now = SystemTime::now();
        let mut stats = LargeFileScanStats::default();

        if !root.exists() {
            return Err(ScanError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        log::info!(
            "Scanning {} for files of {} bytes or more",
            root.display(),
            self.threshold
        );

        let mut walker = FileWalker::new(root, ExclusionFilter::new());
        if let Some(ref flag) = self.cancel_flag {
            walker = walker.with_cancel_flag(Arc::clone(flag));
        }

        let mut results: Vec<LargeFileRecord> = Vec::new();
        for record in walker {
            stats.files_seen += 1;
            if record.size < self.threshold {
                continue;
            }

            results.push(LargeFileRecord::new(record, now));
            if results.len() % LARGE_FILE_PROGRESS_INTERVAL == 0 && !self.is_cancelled() {
                if let Some(ref progress) = self.progress {
                    progress.on_progress(results.len(), 0);
                }
            }
        }

        stats.interrupted = self.is_cancelled();

        // Stable sort keeps discovery order within equal sizes
        results.sort_by(|a, b| b.record.size.cmp(&a.record.size));

        stats.files_found = results.len();
        stats.total_size = results.iter().map(LargeFileRecord::size).sum();
        stats.scan_duration = start.elapsed();

        if stats.interrupted {
            log::info!(
                "Large-file scan cancelled; returning {} files found so far",
                stats.files_found
            );
        } else {
            log::info!(
                "Large-file scan complete: {} files, {} bytes total",
                stats.files_found,
                stats.total_size
            );
        }

        Ok((results, stats))
    }
}
