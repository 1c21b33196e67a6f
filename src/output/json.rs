//! JSON output formatters for scan and cleanup results.
//!
//! Provides machine-readable JSON output for scripting and automation. Each
//! operation has its own report type so consumers get a stable schema per
//! subcommand.
//!
//! # Duplicate Report Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "hash": "abc123...",
//!       "size": 1048576,
//!       "wasted_space": 1048576,
//!       "files": ["/path/to/file1.bin", "/path/to/file2.bin"]
//!     }
//!   ],
//!   "summary": {
//!     "files_considered": 100,
//!     "files_hashed": 98,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "wasted_space": 1048576,
//!     "scan_duration_ms": 1234,
//!     "interrupted": false,
//!     "exit_code": 0,
//!     "exit_code_name": "SW000"
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use spacesweep::discovery::DuplicateScanner;
//! use spacesweep::error::ExitCode;
//! use spacesweep::output::DuplicateReport;
//! use std::path::Path;
//!
//! let scanner = DuplicateScanner::new();
//! let (groups, stats) = scanner.scan(Path::new(".")).unwrap();
//!
//! let report = DuplicateReport::new(&groups, &stats, ExitCode::Success);
//! println!("{}", report.to_json_pretty().unwrap());
//! ```

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::cleaner::{BatchDeleteResult, MoveResult};
use crate::discovery::{DuplicateGroup, DuplicateScanStats, LargeFileRecord, LargeFileScanStats};
use crate::error::ExitCode;

use super::format_timestamp;

/// Errors that can occur during JSON output.
#[derive(Debug, thiserror::Error)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// BLAKE3 hash as hexadecimal string (64 characters)
    pub hash: String,
    /// Size of one member in bytes
    pub size: u64,
    /// Bytes reclaimable by removing the redundant copies
    pub wasted_space: u64,
    /// Absolute paths to all member files, first-seen first
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Convert a domain group into its JSON shape.
    #[must_use]
    pub fn from_group(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.hash_hex(),
            size: group.size,
            wasted_space: group.wasted_space(),
            files: group
                .files
                .iter()
                .map(|f| normalize_path(&f.path))
                .collect(),
        }
    }
}

/// Duplicate scan summary in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateSummary {
    /// Files that met the size floor
    pub files_considered: usize,
    /// Files successfully hashed
    pub files_hashed: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups
    pub duplicate_files: usize,
    /// Total reclaimable bytes
    pub wasted_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// Whether the scan was interrupted
    pub interrupted: bool,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "SW000")
    pub exit_code_name: String,
}

/// Complete JSON report for a duplicate scan.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    /// List of duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonDuplicateSummary,
}

impl DuplicateReport {
    /// Build a report from scan results and the exit code for this run.
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], stats: &DuplicateScanStats, exit_code: ExitCode) -> Self {
        Self {
            duplicates: groups.iter().map(JsonDuplicateGroup::from_group).collect(),
            summary: JsonDuplicateSummary {
                files_considered: stats.files_considered,
                files_hashed: stats.files_hashed,
                duplicate_groups: stats.duplicate_groups,
                duplicate_files: stats.duplicate_files,
                wasted_space: stats.wasted_space,
                scan_duration_ms: stats.scan_duration.as_millis() as u64,
                interrupted: stats.interrupted,
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        write_json(writer, self, pretty)
    }
}

/// A single large file in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonLargeFile {
    /// Absolute path to the file
    pub path: String,
    /// File size in bytes
    pub size: u64,
    /// Coarse type label ("video", "archive", ...)
    pub kind: String,
    /// Whole days since last modification
    pub age_days: u64,
    /// Last modified time (RFC 3339)
    pub modified: String,
}

impl JsonLargeFile {
    /// Convert a domain record into its JSON shape.
    #[must_use]
    pub fn from_record(record: &LargeFileRecord) -> Self {
        Self {
            path: normalize_path(&record.record.path),
            size: record.size(),
            kind: record.kind.label().to_string(),
            age_days: record.age_days,
            modified: format_timestamp(record.record.modified),
        }
    }
}

/// Large-file scan summary in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonLargeFileSummary {
    /// All files the walk visited
    pub files_seen: usize,
    /// Files at or above the threshold
    pub files_found: usize,
    /// Combined size of everything found, in bytes
    pub total_size: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// Whether the scan was interrupted
    pub interrupted: bool,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name
    pub exit_code_name: String,
}

/// Complete JSON report for a large-file scan.
#[derive(Debug, Clone, Serialize)]
pub struct LargeFileReport {
    /// Files at or above the threshold, largest first
    pub large_files: Vec<JsonLargeFile>,
    /// Scan summary statistics
    pub summary: JsonLargeFileSummary,
}

impl LargeFileReport {
    /// Build a report from scan results and the exit code for this run.
    #[must_use]
    pub fn new(
        records: &[LargeFileRecord],
        stats: &LargeFileScanStats,
        exit_code: ExitCode,
    ) -> Self {
        Self {
            large_files: records.iter().map(JsonLargeFile::from_record).collect(),
            summary: JsonLargeFileSummary {
                files_seen: stats.files_seen,
                files_found: stats.files_found,
                total_size: stats.total_size,
                scan_duration_ms: stats.scan_duration.as_millis() as u64,
                interrupted: stats.interrupted,
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        write_json(writer, self, pretty)
    }
}

/// A deleted folder in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDeletedFolder {
    /// Folder that was removed
    pub path: String,
    /// Bytes measured under the tree before removal
    pub bytes_freed: u64,
}

/// A failed deletion in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonFailedFolder {
    /// Folder that could not be removed
    pub path: String,
    /// Why it failed, including any lock hint
    pub error: String,
}

/// Batch cleanup summary in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonCleanSummary {
    /// Folders removed
    pub folders_deleted: usize,
    /// Folders that failed
    pub folders_failed: usize,
    /// Total bytes freed
    pub bytes_freed: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name
    pub exit_code_name: String,
}

/// Complete JSON report for a batch cleanup.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// Folders removed, in batch order
    pub deleted: Vec<JsonDeletedFolder>,
    /// Folders that failed, in batch order
    pub failed: Vec<JsonFailedFolder>,
    /// Batch summary
    pub summary: JsonCleanSummary,
}

impl CleanReport {
    /// Build a report from a batch result and the exit code for this run.
    #[must_use]
    pub fn new(result: &BatchDeleteResult, exit_code: ExitCode) -> Self {
        Self {
            deleted: result
                .successes
                .iter()
                .map(|s| JsonDeletedFolder {
                    path: s.path.to_string_lossy().into_owned(),
                    bytes_freed: s.bytes_freed,
                })
                .collect(),
            failed: result
                .failures
                .iter()
                .map(|f| JsonFailedFolder {
                    path: f.path.to_string_lossy().into_owned(),
                    error: f.message.clone(),
                })
                .collect(),
            summary: JsonCleanSummary {
                folders_deleted: result.success_count(),
                folders_failed: result.failure_count(),
                bytes_freed: result.bytes_freed,
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// JSON report for a file move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveReport {
    /// Original location
    pub source: String,
    /// Where the file now lives
    pub destination: String,
}

impl MoveReport {
    /// Build a report from a move result.
    #[must_use]
    pub fn new(result: &MoveResult) -> Self {
        Self {
            source: result.source.to_string_lossy().into_owned(),
            destination: result.destination.to_string_lossy().into_owned(),
        }
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn write_json<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> Result<(), JsonOutputError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Normalize a path to an absolute path string.
///
/// Attempts to canonicalize the path. If that fails (e.g., file no longer
/// exists), falls back to the display representation.
fn normalize_path(path: &Path) -> String {
    match path.canonicalize() {
        Ok(canonical) => canonical.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
