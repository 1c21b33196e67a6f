//! Discovery engines for reclaimable disk space.
//!
//! Two scanners share the same traversal, exclusion, and cancellation
//! machinery from [`crate::scanner`]:
//! - [`duplicates`]: groups files by content digest and ranks groups by
//!   wasted space
//! - [`large_files`]: lists individual files at or above a size threshold
//!
//! Both are synchronous; callers that must not block run them on a worker
//! thread and communicate through the progress callback and cancel flag.
//! The two scanners share no mutable state, so they can run concurrently
//! against the same tree.

pub mod duplicates;
pub mod large_files;

pub use duplicates::{
    DuplicateGroup, DuplicateScanStats, DuplicateScanner, DEFAULT_MIN_DUPLICATE_SIZE,
};
pub use large_files::{
    LargeFileRecord, LargeFileScanStats, LargeFileScanner, DEFAULT_LARGE_FILE_THRESHOLD,
};
