//! System-path exclusion policy.
//!
//! Decides which paths are out of scope for scanning: OS install trees,
//! program-install trees, recycle-bin and volume metadata, Unix pseudo
//! filesystems, and anything whose name marks it as hidden or system-owned.
//! The walker consults this filter *before* descending into a directory, so
//! excluded subtrees are pruned rather than visited and filtered.

use std::path::Path;

/// Path substrings that mark a location as out of scope.
///
/// Compared case-insensitively against the full path. `c:\program files`
/// also covers the `(x86)` tree by substring, but both are listed for
/// clarity.
const EXCLUDED_PATH_SUBSTRINGS: &[&str] = &[
    "c:\\windows",
    "c:\\program files",
    "c:\\program files (x86)",
    "c:\\programdata",
    "$recycle.bin",
    "system volume information",
    ".trash",
];

/// Pseudo-filesystem roots excluded by component-wise prefix.
///
/// These names are too short for substring matching (`/run` would match any
/// file called `run.sh`), so they are compared as path prefixes instead.
const EXCLUDED_PREFIXES: &[&str] = &["/proc", "/sys", "/dev", "/run"];

/// Pure predicate deciding whether a path is out of scope for scanning.
///
/// No I/O is performed; decisions are string comparisons only. The scan
/// root itself is the caller's explicit choice and is never passed through
/// this filter; pruning applies to the entries discovered beneath it.
/// Because excluded directories are never descended into, checking each
/// entry's own name is equivalent to checking every path component below
/// the root.
///
/// # Example
///
/// ```
/// use spacesweep::scanner::ExclusionFilter;
/// use std::path::Path;
///
/// let filter = ExclusionFilter::new();
/// assert!(filter.should_exclude(Path::new("/home/user/.cache")));
/// assert!(filter.should_exclude(Path::new("C:\\Windows\\Temp")));
/// assert!(!filter.should_exclude(Path::new("/home/user/videos")));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExclusionFilter;

impl ExclusionFilter {
    /// Create the standard exclusion filter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Check whether the given path is out of scope.
    ///
    /// True when the final component starts with `.` or `$`, when the
    /// lowercased path contains one of the fixed excluded substrings, or
    /// when the path sits under a Unix pseudo filesystem.
    #[must_use]
    pub fn should_exclude(&self, path: &Path) -> bool {
        if let Some(name) = path.file_name() {
            let name = name.to_string_lossy();
            if name.starts_with('.') || name.starts_with('$') {
                return true;
            }
        }

        let lowered = path.to_string_lossy().to_lowercase();
        if EXCLUDED_PATH_SUBSTRINGS
            .iter()
            .any(|needle| lowered.contains(needle))
        {
            return true;
        }

        EXCLUDED_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }
}
