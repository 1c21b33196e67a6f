//! Duplicate detection by content hash.
//!
//! # Overview
//!
//! The scan runs in two passes over the same pruned walk. The counting
//! pass tallies every qualifying file (size at or above the minimum) to
//! fix a denominator for progress percentages. The hashing pass re-walks
//! the tree, digests each qualifying file, and buckets records by digest.
//! Buckets with fewer than two members are discarded; the rest become
//! [`DuplicateGroup`]s sorted by wasted space descending, ties keeping
//! first-seen order.
//!
//! Files that vanish or turn unreadable between the passes are skipped,
//! which makes the denominator an estimate rather than a guarantee.
//!
//! # Example
//!
//! ```no_run
//! use spacesweep::discovery::DuplicateScanner;
//! use std::path::Path;
//!
//! let scanner = DuplicateScanner::new();
//! let (groups, stats) = scanner.scan(Path::new("/home/user/Downloads")).unwrap();
//! for group in &groups {
//!     println!("{} copies of {} bytes", group.file_count(), group.size);
//! }
//! println!("{} bytes reclaimable", stats.wasted_space);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::progress::ScanProgressCallback;
use crate::scanner::{
    hash_to_hex, try_hash_file, ExclusionFilter, FileRecord, FileWalker, Hash, ScanError,
};

/// Files below this size are never considered for duplicate grouping.
pub const DEFAULT_MIN_DUPLICATE_SIZE: u64 = 1024 * 1024;

/// Progress is reported once per this many files hashed.
pub const DUPLICATE_PROGRESS_INTERVAL: usize = 50;

/// A set of files sharing one content digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Content digest shared by every member
    pub hash: Hash,
    /// Size of one member in bytes
    pub size: u64,
    /// Member files, in the order the walk discovered them
    pub files: Vec<FileRecord>,
}

impl DuplicateGroup {
    /// Create a group from a digest bucket.
    #[must_use]
    pub fn new(hash: Hash, size: u64, files: Vec<FileRecord>) -> Self {
        Self { hash, size, files }
    }

    /// Number of member files, originals included.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of redundant copies (members beyond the first).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes reclaimable by keeping a single member.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// The shared digest as lowercase hex.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }
}

/// Counters describing one duplicate scan.
#[derive(Debug, Clone, Default)]
pub struct DuplicateScanStats {
    /// Qualifying files counted in the counting pass
    pub files_considered: usize,
    /// Files successfully hashed in the hashing pass
    pub files_hashed: usize,
    /// Groups with two or more members
    pub duplicate_groups: usize,
    /// Redundant copies across all groups
    pub duplicate_files: usize,
    /// Total reclaimable bytes across all groups
    pub wasted_space: u64,
    /// Wall-clock duration of both passes
    pub scan_duration: Duration,
    /// Whether the scan stopped early on the cancel flag
    pub interrupted: bool,
}

/// Two-pass duplicate scanner.
///
/// Configure with the builder methods, then call [`scan`](Self::scan).
/// Cancellation is cooperative: the flag is polled at every directory and
/// file boundary, and a cancelled scan returns whatever groups were
/// accumulated so far with `interrupted` set in the stats.
pub struct DuplicateScanner {
    min_size: u64,
    cancel_flag: Option<Arc<AtomicBool>>,
    progress: Option<Arc<dyn ScanProgressCallback>>,
}

impl fmt::Debug for DuplicateScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicateScanner")
            .field("min_size", &self.min_size)
            .field("cancel_flag", &self.cancel_flag)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Default for DuplicateScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateScanner {
    /// Create a scanner with the default minimum size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_size: DEFAULT_MIN_DUPLICATE_SIZE,
            cancel_flag: None,
            progress: None,
        }
    }

    /// Set the minimum file size for consideration, in bytes.
    #[must_use]
    pub fn with_min_size(mut self, min_size: u64) -> Self {
        self.min_size = min_size;
        self
    }

    /// Attach a cancellation flag shared with the caller.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// Attach a progress callback.
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

    fn walker(&self, root: &Path) -> FileWalker {
        let mut walker = FileWalker::new(root, ExclusionFilter::new());
        if let Some(ref flag) = self.cancel_flag {
            walker = walker.with_cancel_flag(Arc::clone(flag));
        }
        walker
    }

    /// Scan a tree for duplicate files.
    ///
    /// Returns the groups sorted by wasted space descending, along with
    /// scan statistics. Per-entry walk errors are logged and skipped; the
    /// only errors surfaced here are an absent or non-directory root.
    ///
    /// # Errors
    ///
    /// [`ScanError::NotFound`] when the root does not exist,
    /// [`ScanError::NotADirectory`] when it is not a directory.
    pub fn scan(&self, root: &Path) -> Result<(Vec<DuplicateGroup>, DuplicateScanStats), ScanError> {
        let start = Instant::now();
        let mut stats = DuplicateScanStats::default();

        if !root.exists() {
            return Err(ScanError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        log::info!(
            "Scanning {} for duplicates (minimum size {} bytes)",
            root.display(),
            self.min_size
        );

        // Counting pass: fix the progress denominator
        let total = self
            .walker(root)
            .filter(|f| f.size >= self.min_size)
            .count();
        stats.files_considered = total;
        log::debug!("Counting pass found {total} candidate files");

        if self.is_cancelled() {
            log::info!("Duplicate scan cancelled during counting pass");
            stats.interrupted = true;
            stats.scan_duration = start.elapsed();
            return Ok((Vec::new(), stats));
        }

        // Hashing pass: bucket records by digest, remembering the order
        // buckets first appeared so ties sort stably later
        let mut buckets: HashMap<Hash, Vec<FileRecord>> = HashMap::new();
        let mut bucket_order: Vec<Hash> = Vec::new();
        let mut processed = 0usize;

        for record in self.walker(root) {
            if record.size < self.min_size {
                continue;
            }

            processed += 1;
            if processed % DUPLICATE_PROGRESS_INTERVAL == 0 && !self.is_cancelled() {
                if let Some(ref progress) = self.progress {
                    progress.on_progress(processed, total);
                }
            }

            let Some(hash) = try_hash_file(&record.path) else {
                continue;
            };
            stats.files_hashed += 1;

            let bucket = buckets.entry(hash).or_insert_with(|| {
                bucket_order.push(hash);
                Vec::new()
            });
            bucket.push(record);
        }

        stats.interrupted = self.is_cancelled();

        let mut groups: Vec<DuplicateGroup> = bucket_order
            .into_iter()
            .filter_map(|hash| {
                let files = buckets.remove(&hash)?;
                (files.len() >= 2).then(|| {
                    let size = files.first().map_or(0, |f| f.size);
                    DuplicateGroup::new(hash, size, files)
                })
            })
            .collect();
        // Stable sort keeps first-seen order within equal waste
        groups.sort_by(|a, b| b.wasted_space().cmp(&a.wasted_space()));

        stats.duplicate_groups = groups.len();
        stats.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        stats.wasted_space = groups.iter().map(DuplicateGroup::wasted_space).sum();
        stats.scan_duration = start.elapsed();

        if stats.interrupted {
            log::info!(
                "Duplicate scan cancelled after {} files; returning {} groups",
                processed,
                stats.duplicate_groups
            );
        } else {
            log::info!(
                "Duplicate scan complete: {} groups, {} redundant files, {} bytes reclaimable",
                stats.duplicate_groups,
                stats.duplicate_files,
                stats.wasted_space
            );
        }

        Ok((groups, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Records every progress call for later assertions.
    struct RecordingCallback {
        calls: Mutex<Vec<(usize, usize)>>,
    }

    impl RecordingCallback {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ScanProgressCallback for RecordingCallback {
        fn on_progress(&self, done: usize, total: usize) {
            self.calls.lock().unwrap().push((done, total));
        }
    }

    #[test]
    fn test_finds_duplicate_pair() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.bin", b"identical content here");
        write_file(&dir, "b.bin", b"identical content here");
        write_file(&dir, "c.bin", b"something entirely different");

        let scanner = DuplicateScanner::new().with_min_size(1);
        let (groups, stats) = scanner.scan(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].file_count(), 2);
        assert_eq!(groups[0].size, 22);
        assert_eq!(groups[0].wasted_space(), 22);
        assert_eq!(stats.files_considered, 3);
        assert_eq!(stats.files_hashed, 3);
        assert_eq!(stats.duplicate_files, 1);
        assert!(!stats.interrupted);
    }

    #[test]
    fn test_no_duplicates_yields_empty() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.bin", b"one");
        write_file(&dir, "b.bin", b"two");

        let scanner = DuplicateScanner::new().with_min_size(1);
        let (groups, stats) = scanner.scan(dir.path()).unwrap();

        assert!(groups.is_empty());
        assert_eq!(stats.wasted_space, 0);
    }

    #[test]
    fn test_small_files_never_grouped() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.bin", b"tiny copy");
        write_file(&dir, "b.bin", b"tiny copy");

        let scanner = DuplicateScanner::new().with_min_size(1024);
        let (groups, stats) = scanner.scan(dir.path()).unwrap();

        assert!(groups.is_empty());
        assert_eq!(stats.files_considered, 0);
        assert_eq!(stats.files_hashed, 0);
    }

    #[test]
    fn test_boundary_size_is_included() {
        let dir = TempDir::new().unwrap();
        let content = vec![7u8; 16];
        write_file(&dir, "a.bin", &content);
        write_file(&dir, "b.bin", &content);

        let scanner = DuplicateScanner::new().with_min_size(16);
        let (groups, _) = scanner.scan(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_groups_sorted_by_wasted_space() {
        let dir = TempDir::new().unwrap();
        // Pair wasting 100 bytes
        write_file(&dir, "p1.bin", &[b'a'; 100]);
        write_file(&dir, "p2.bin", &[b'a'; 100]);
        // Triple wasting 600 bytes
        write_file(&dir, "t1.bin", &[b'b'; 300]);
        write_file(&dir, "t2.bin", &[b'b'; 300]);
        write_file(&dir, "t3.bin", &[b'b'; 300]);

        let scanner = DuplicateScanner::new().with_min_size(1);
        let (groups, stats) = scanner.scan(dir.path()).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].wasted_space(), 600);
        assert_eq!(groups[1].wasted_space(), 100);
        assert_eq!(stats.wasted_space, 700);
        assert_eq!(stats.duplicate_files, 3);
    }

    #[test]
    fn test_duplicates_found_in_subdirectories() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "top.bin", b"shared payload across dirs");
        let sub = dir.path().join("nested").join("deeper");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("copy.bin"), b"shared payload across dirs").unwrap();

        let scanner = DuplicateScanner::new().with_min_size(1);
        let (groups, _) = scanner.scan(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].file_count(), 2);
    }

    #[test]
    fn test_progress_cadence() {
        let dir = TempDir::new().unwrap();
        for i in 0..120 {
            write_file(&dir, &format!("f{i:03}.bin"), format!("{i:03}").as_bytes());
        }

        let callback = Arc::new(RecordingCallback::new());
        let scanner = DuplicateScanner::new()
            .with_min_size(1)
            .with_progress(Arc::clone(&callback) as Arc<dyn ScanProgressCallback>);
        let (_, stats) = scanner.scan(dir.path()).unwrap();

        assert_eq!(stats.files_considered, 120);
        let calls = callback.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(50, 120), (100, 120)]);
    }

    #[test]
    fn test_cancelled_scan_returns_cleanly() {
        let dir = TempDir::new().unwrap();
        write_file(&dir, "a.bin", b"identical content here");
        write_file(&dir, "b.bin", b"identical content here");

        let cancel = Arc::new(AtomicBool::new(true));
        let scanner = DuplicateScanner::new()
            .with_min_size(1)
            .with_cancel_flag(Arc::clone(&cancel));
        let (groups, stats) = scanner.scan(dir.path()).unwrap();

        assert!(groups.is_empty());
        assert!(stats.interrupted);
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");

        let scanner = DuplicateScanner::new();
        match scanner.scan(&missing) {
            Err(ScanError::NotFound(p)) => assert_eq!(p, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_file_root_is_error() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "plain.txt", b"not a directory");

        let scanner = DuplicateScanner::new();
        match scanner.scan(&file) {
            Err(ScanError::NotADirectory(p)) => assert_eq!(p, file),
            other => panic!("expected NotADirectory, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_root_yields_empty() {
        let dir = TempDir::new().unwrap();

        let scanner = DuplicateScanner::new();
        let (groups, stats) = scanner.scan(dir.path()).unwrap();

        assert!(groups.is_empty());
        assert_eq!(stats.files_considered, 0);
        assert!(!stats.interrupted);
    }

    #[test]
    fn test_group_accessors() {
        let record = |name: &str| {
            FileRecord::new(
                PathBuf::from(format!("/data/{name}")),
                2048,
                std::time::SystemTime::now(),
            )
        };
        let group = DuplicateGroup::new([0u8; 32], 2048, vec![record("a"), record("b"), record("c")]);

        assert_eq!(group.file_count(), 3);
        assert_eq!(group.duplicate_count(), 2);
        assert_eq!(group.wasted_space(), 4096);
        assert_eq!(group.hash_hex().len(), 64);
    }
}
